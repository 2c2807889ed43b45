use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Format used for `updated_at` fields in the feed.
pub const UPDATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Percent change from `previous_close` to `price`, rounded to two decimals.
///
/// Returns zero when the previous close is missing or zero.
pub fn calc_change_percent(price: Decimal, previous_close: Option<Decimal>) -> Decimal {
    match previous_close {
        Some(prev) if !prev.is_zero() => ((price - prev) / prev * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven),
        _ => Decimal::ZERO,
    }
}

/// Latest state of one symbol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    pub symbol: String,

    /// Timestamp of the most recent bar
    pub timestamp: DateTime<Utc>,

    /// Last close
    pub price: Decimal,

    /// Close of the bar before the last one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_close: Option<Decimal>,

    /// Volume of the most recent bar
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,

    /// Source of the quote (YAHOO, ...)
    pub source: String,
}

impl QuoteSnapshot {
    pub fn change_percent(&self) -> Decimal {
        calc_change_percent(self.price, self.previous_close)
    }
}

/// Value of a market index or key indicator as written to the feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexValue {
    pub price: Decimal,
    pub change_percent: Decimal,
    pub updated_at: String,
}

impl IndexValue {
    pub fn from_snapshot(snapshot: &QuoteSnapshot, as_of: DateTime<Utc>) -> Self {
        Self {
            price: snapshot
                .price
                .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven),
            change_percent: snapshot.change_percent(),
            updated_at: as_of.format(UPDATED_AT_FORMAT).to_string(),
        }
    }
}
