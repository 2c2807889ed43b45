//! Yahoo Finance quote provider.
//!
//! Works for equities (NVDA, 005930.KS), indices (^GSPC, ^KS11), FX
//! (USDKRW=X), crypto (BTC-USD) and futures (GC=F).

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::QuoteSnapshot;
use crate::provider::QuoteProvider;

const PROVIDER_ID: &str = "YAHOO";

/// Daily bar interval and lookback window.
///
/// Five sessions cover weekends and single-day market holidays.
const INTERVAL: &str = "1d";
const RANGE: &str = "5d";

/// One daily bar reduced to the fields a snapshot needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct DailyBar {
    pub timestamp: i64,
    pub close: f64,
    pub volume: u64,
}

impl From<&yahoo::Quote> for DailyBar {
    fn from(quote: &yahoo::Quote) -> Self {
        Self {
            timestamp: quote.timestamp as i64,
            close: quote.close,
            volume: quote.volume,
        }
    }
}

/// Yahoo Finance quote provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to initialize Yahoo connector: {}", e),
            })?;
        Ok(Self { connector })
    }
}

/// Build a snapshot from daily bars in chronological order.
///
/// Bars with a non-finite or non-positive close are ignored. The price is the
/// last usable close, the previous close the one before it.
pub(crate) fn snapshot_from_bars(
    symbol: &str,
    bars: &[DailyBar],
) -> Result<QuoteSnapshot, MarketDataError> {
    let usable: Vec<(DailyBar, Decimal)> = bars
        .iter()
        .filter(|bar| bar.close.is_finite() && bar.close > 0.0)
        .filter_map(|bar| Decimal::from_f64_retain(bar.close).map(|close| (*bar, close)))
        .collect();

    let Some((last, price)) = usable.last().copied() else {
        return Err(MarketDataError::NoData(symbol.to_string()));
    };
    let previous_close = usable
        .len()
        .checked_sub(2)
        .and_then(|index| usable.get(index))
        .map(|(_, close)| *close);

    let timestamp: DateTime<Utc> = Utc
        .timestamp_opt(last.timestamp, 0)
        .single()
        .ok_or_else(|| MarketDataError::ValidationFailed {
            message: format!("Invalid timestamp: {}", last.timestamp),
        })?;

    Ok(QuoteSnapshot {
        symbol: symbol.to_string(),
        timestamp,
        price,
        previous_close,
        volume: Some(last.volume),
        source: PROVIDER_ID.to_string(),
    })
}

#[async_trait]
impl QuoteProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn latest_snapshot(&self, symbol: &str) -> Result<QuoteSnapshot, MarketDataError> {
        debug!("Fetching {} daily bars for {} from Yahoo", RANGE, symbol);

        let response = self
            .connector
            .get_quote_range(symbol, INTERVAL, RANGE)
            .await
            .map_err(|e| {
                if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
                    MarketDataError::SymbolNotFound(symbol.to_string())
                } else {
                    MarketDataError::ProviderError {
                        provider: PROVIDER_ID.to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        let quotes = response.quotes().map_err(|e| {
            warn!("No quotes returned for {}: {}", symbol, e);
            MarketDataError::NoData(symbol.to_string())
        })?;

        let bars: Vec<DailyBar> = quotes.iter().map(DailyBar::from).collect();
        snapshot_from_bars(symbol, &bars)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn bar(timestamp: i64, close: f64, volume: u64) -> DailyBar {
        DailyBar {
            timestamp,
            close,
            volume,
        }
    }

    #[test]
    fn test_snapshot_uses_last_two_closes() {
        let bars = [
            bar(1_760_000_000, 100.0, 10),
            bar(1_760_086_400, 102.0, 20),
            bar(1_760_172_800, 104.5, 30),
        ];
        let snapshot = snapshot_from_bars("NVDA", &bars).unwrap();

        assert_eq!(snapshot.price, dec!(104.5));
        assert_eq!(snapshot.previous_close, Some(dec!(102)));
        assert_eq!(snapshot.volume, Some(30));
        assert_eq!(snapshot.timestamp.timestamp(), 1_760_172_800);
        assert_eq!(snapshot.source, "YAHOO");
    }

    #[test]
    fn test_single_bar_has_no_previous_close() {
        let snapshot = snapshot_from_bars("^KS11", &[bar(1_760_000_000, 2600.0, 0)]).unwrap();
        assert_eq!(snapshot.previous_close, None);
        assert_eq!(snapshot.change_percent(), Decimal::ZERO);
    }

    #[test]
    fn test_unusable_bars_are_skipped() {
        let bars = [
            bar(1_760_000_000, 50.0, 5),
            bar(1_760_086_400, f64::NAN, 0),
            bar(1_760_172_800, 55.0, 7),
            bar(1_760_259_200, 0.0, 0),
        ];
        let snapshot = snapshot_from_bars("TSLA", &bars).unwrap();

        assert_eq!(snapshot.price, dec!(55));
        assert_eq!(snapshot.previous_close, Some(dec!(50)));
        assert_eq!(snapshot.change_percent(), dec!(10));
    }

    #[test]
    fn test_no_bars_is_no_data() {
        let result = snapshot_from_bars("EMPTY", &[]);
        assert!(matches!(result, Err(MarketDataError::NoData(s)) if s == "EMPTY"));
    }
}
