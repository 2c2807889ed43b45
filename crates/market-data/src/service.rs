//! Quote collection for the feed.
//!
//! Wraps a [`QuoteProvider`] and turns per-symbol fetches into the shapes the
//! sync job writes: index values, stock snapshots and volume rankings. A
//! symbol that fails is logged and left out; none of these operations fail as
//! a whole.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::models::{IndexValue, QuoteSnapshot};
use crate::provider::QuoteProvider;

pub struct MarketDataService {
    provider: Arc<dyn QuoteProvider>,
}

impl MarketDataService {
    pub fn new(provider: Arc<dyn QuoteProvider>) -> Self {
        Self { provider }
    }

    /// Snapshots for `symbols`, in input order, skipping failures.
    pub async fn snapshots(&self, symbols: &[String]) -> Vec<QuoteSnapshot> {
        let mut snapshots = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            match self.provider.latest_snapshot(symbol).await {
                Ok(snapshot) => snapshots.push(snapshot),
                Err(e) => warn!(
                    "Skipping '{}' from provider '{}': {}",
                    symbol,
                    self.provider.id(),
                    e
                ),
            }
        }
        debug!(
            "Fetched {} of {} snapshots",
            snapshots.len(),
            symbols.len()
        );
        snapshots
    }

    /// Values for named indices or indicators (`name -> ticker`).
    pub async fn index_values(
        &self,
        indices: &BTreeMap<String, String>,
        as_of: DateTime<Utc>,
    ) -> BTreeMap<String, IndexValue> {
        let mut values = BTreeMap::new();
        for (name, ticker) in indices {
            match self.provider.latest_snapshot(ticker).await {
                Ok(snapshot) => {
                    values.insert(name.clone(), IndexValue::from_snapshot(&snapshot, as_of));
                }
                Err(e) => warn!("Index error ({} / {}): {}", name, ticker, e),
            }
        }
        values
    }

    /// The `top_n` snapshots with the highest volume.
    pub async fn top_by_volume(&self, symbols: &[String], top_n: usize) -> Vec<QuoteSnapshot> {
        rank_by_volume(self.snapshots(symbols).await, top_n)
    }
}

/// Sort by volume descending and keep `top_n`. Snapshots without volume are
/// dropped. Ties keep input order.
pub fn rank_by_volume(snapshots: Vec<QuoteSnapshot>, top_n: usize) -> Vec<QuoteSnapshot> {
    let mut ranked: Vec<QuoteSnapshot> = snapshots
        .into_iter()
        .filter(|s| s.volume.is_some())
        .collect();
    ranked.sort_by(|a, b| b.volume.cmp(&a.volume));
    ranked.truncate(top_n);
    ranked
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::errors::MarketDataError;

    struct MockProvider {
        quotes: HashMap<&'static str, (Decimal, Option<Decimal>, Option<u64>)>,
        calls: AtomicUsize,
    }

    impl MockProvider {
        fn new(quotes: &[(&'static str, Decimal, Option<Decimal>, Option<u64>)]) -> Arc<Self> {
            Arc::new(Self {
                quotes: quotes
                    .iter()
                    .map(|(symbol, price, prev, volume)| (*symbol, (*price, *prev, *volume)))
                    .collect(),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl QuoteProvider for MockProvider {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        async fn latest_snapshot(&self, symbol: &str) -> Result<QuoteSnapshot, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let (price, previous_close, volume) = self
                .quotes
                .get(symbol)
                .copied()
                .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;
            Ok(QuoteSnapshot {
                symbol: symbol.to_string(),
                timestamp: Utc.with_ymd_and_hms(2026, 10, 14, 20, 0, 0).unwrap(),
                price,
                previous_close,
                volume,
                source: "MOCK".to_string(),
            })
        }
    }

    fn symbols(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_snapshots_skip_failures() {
        let provider = MockProvider::new(&[
            ("NVDA", dec!(120), Some(dec!(100)), Some(500)),
            ("AAPL", dec!(200), Some(dec!(210)), Some(300)),
        ]);
        let service = MarketDataService::new(provider.clone());

        let snapshots = service
            .snapshots(&symbols(&["NVDA", "MISSING", "AAPL"]))
            .await;

        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].symbol, "NVDA");
        assert_eq!(snapshots[1].symbol, "AAPL");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_index_values_by_name() {
        let provider = MockProvider::new(&[
            ("^KS11", dec!(2650.456), Some(dec!(2600)), Some(0)),
            ("^KQ11", dec!(850), None, None),
        ]);
        let service = MarketDataService::new(provider);

        let indices: BTreeMap<String, String> = [
            ("KOSPI", "^KS11"),
            ("KOSDAQ", "^KQ11"),
            ("BROKEN", "^NONE"),
        ]
        .into_iter()
        .map(|(name, ticker)| (name.to_string(), ticker.to_string()))
        .collect();
        let as_of = Utc.with_ymd_and_hms(2026, 10, 15, 0, 0, 0).unwrap();

        let values = service.index_values(&indices, as_of).await;

        assert_eq!(values.len(), 2);
        assert_eq!(values["KOSPI"].price, dec!(2650.46));
        assert_eq!(values["KOSPI"].change_percent, dec!(1.94));
        assert_eq!(values["KOSDAQ"].change_percent, Decimal::ZERO);
        assert_eq!(values["KOSDAQ"].updated_at, "2026-10-15 00:00:00");
    }

    #[tokio::test]
    async fn test_top_by_volume() {
        let provider = MockProvider::new(&[
            ("A", dec!(1), None, Some(10)),
            ("B", dec!(1), None, Some(30)),
            ("C", dec!(1), None, None),
            ("D", dec!(1), None, Some(20)),
        ]);
        let service = MarketDataService::new(provider);

        let top = service
            .top_by_volume(&symbols(&["A", "B", "C", "D"]), 2)
            .await;

        let ranked: Vec<_> = top.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(ranked, vec!["B", "D"]);
    }
}
