//! Index and indicator tickers written to the feed.

use std::collections::BTreeMap;

/// How many tracked stocks `stock_data` keeps, by volume.
pub const DEFAULT_TOP_VOLUME: usize = 10;

/// Named tickers (`name -> Yahoo symbol`) per feed section.
#[derive(Clone, Debug)]
pub struct MarketConfig {
    pub domestic_indices: BTreeMap<String, String>,
    pub global_indices: BTreeMap<String, String>,
    pub indicators: BTreeMap<String, String>,
    pub top_volume: usize,
}

fn named(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(name, ticker)| (name.to_string(), ticker.to_string()))
        .collect()
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            domestic_indices: named(&[("KOSPI", "^KS11"), ("KOSDAQ", "^KQ11")]),
            global_indices: named(&[("S&P500", "^GSPC"), ("NASDAQ", "^IXIC")]),
            indicators: named(&[
                ("USD_KRW", "USDKRW=X"),
                ("US_10Y", "^TNX"),
                ("BTC", "BTC-USD"),
                ("Gold", "GC=F"),
            ]),
            top_volume: DEFAULT_TOP_VOLUME,
        }
    }
}
