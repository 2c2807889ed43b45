//! One pass of the sync job.
//!
//! Order: indices and indicators, stock data (the tracked symbols with the
//! highest volume), news per category, one summary per category, then the
//! news feed and root fields. Each section is written
//! as soon as it is ready; a failed write is logged and the run continues.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::RoundingStrategy;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use stocksync_ai_router::{
    build_request, Category, GenerationSettings, SummaryRouter, SummarySource,
};
use stocksync_market_data::{MarketDataService, QuoteSnapshot, UPDATED_AT_FORMAT};
use stocksync_news::{NewsDigest, NewsError, NewsSource};
use stocksync_storage::paths::{
    KEY_INDICATORS, MARKET_INDICES_DOMESTIC, MARKET_INDICES_GLOBAL, NEWS_FEED, PORTFOLIO_LIST,
    STOCK_DATA, UPDATED_AT, WATCHLIST_LIST,
};
use stocksync_storage::{save_section, save_summary, FeedStore, StorageError};

use crate::markets::MarketConfig;
use crate::profile::Profile;

/// Stock entry in the `stock_data` section.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StockData {
    /// 1 for the highest volume.
    pub rank: usize,
    pub symbol: String,
    pub name: String,
    pub price: rust_decimal::Decimal,
    pub change_percent: rust_decimal::Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
}

impl StockData {
    fn from_snapshot(rank: usize, snapshot: &QuoteSnapshot, profile: &Profile) -> Self {
        Self {
            rank,
            symbol: snapshot.symbol.clone(),
            name: profile.name_of(&snapshot.symbol).to_string(),
            price: snapshot
                .price
                .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven),
            change_percent: snapshot.change_percent(),
            volume: snapshot.volume,
            sector: profile.sector_of(&snapshot.symbol).map(str::to_string),
        }
    }
}

/// What happened during a run.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub sections_written: usize,
    pub sections_failed: usize,
    pub summaries: Vec<(Category, SummarySource)>,
}

impl SyncReport {
    fn record(&mut self, section: &str, result: Result<(), StorageError>) {
        match result {
            Ok(()) => {
                debug!("Wrote section '{}'", section);
                self.sections_written += 1;
            }
            Err(e) => {
                error!("Failed to write section '{}': {}", section, e);
                self.sections_failed += 1;
            }
        }
    }

    pub fn degraded_summaries(&self) -> usize {
        self.summaries
            .iter()
            .filter(|(_, source)| matches!(source, SummarySource::Degraded(_)))
            .count()
    }
}

pub struct SyncJob {
    pub market: MarketDataService,
    pub news: Arc<dyn NewsSource>,
    pub router: SummaryRouter,
    pub store: Arc<dyn FeedStore>,
    pub profile: Profile,
    pub markets: MarketConfig,
    pub generation: GenerationSettings,
}

impl SyncJob {
    pub async fn run(&self, now: DateTime<Utc>) -> SyncReport {
        let mut report = SyncReport::default();
        let updated_at = now.format(UPDATED_AT_FORMAT).to_string();

        info!("Sync started for profile '{}'", self.profile.username);

        // Indices and indicators
        for (path, indices) in [
            (MARKET_INDICES_DOMESTIC, &self.markets.domestic_indices),
            (MARKET_INDICES_GLOBAL, &self.markets.global_indices),
            (KEY_INDICATORS, &self.markets.indicators),
        ] {
            let values = self.market.index_values(indices, now).await;
            if values.is_empty() {
                warn!("No values for '{}', skipping write", path);
                continue;
            }
            let entries = values
                .iter()
                .map(|(name, value)| (name.as_str(), to_json(value)));
            let result = save_section(self.store.as_ref(), path, entries).await;
            report.record(path, result);
        }

        // Stock data, ranked by volume
        let ranked = self
            .market
            .top_by_volume(&self.profile.tracked_symbols(), self.markets.top_volume)
            .await;
        if ranked.is_empty() {
            warn!("No stock quotes with volume, skipping '{}'", STOCK_DATA);
        } else {
            let entries = ranked.iter().enumerate().map(|(index, snapshot)| {
                (
                    snapshot.symbol.as_str(),
                    to_json(&StockData::from_snapshot(index + 1, snapshot, &self.profile)),
                )
            });
            let result = save_section(self.store.as_ref(), STOCK_DATA, entries).await;
            report.record(STOCK_DATA, result);
        }

        // News and summaries
        let mut news_feed = serde_json::Map::new();
        for (category, subject, queries) in self.category_queries() {
            let digest = self.collect_news(&queries).await;

            let request = build_request(&subject, &digest.context, &self.generation);
            let summary = self.router.summarize_with_diagnostics(&category, &request).await;
            info!(
                "Summary for '{}' after {} provider calls (success: {}): {}",
                category,
                summary.diagnostics.tried_count(),
                summary.diagnostics.has_success(),
                summary.diagnostics.summary()
            );

            let result = save_summary(self.store.as_ref(), category.as_str(), &summary.text).await;
            report.record(&format!("ai_summaries/{}", category), result);
            report.summaries.push((category.clone(), summary.source));

            news_feed.insert(category.to_string(), to_json(&digest.articles));
        }
        let result = self.store.update(NEWS_FEED, Value::Object(news_feed)).await;
        report.record(NEWS_FEED, result);

        // Root fields
        let mut root = serde_json::Map::new();
        root.insert(
            PORTFOLIO_LIST.to_string(),
            json!(self.profile.portfolio.keys().collect::<Vec<_>>()),
        );
        root.insert(
            WATCHLIST_LIST.to_string(),
            json!(self.profile.watchlist.keys().collect::<Vec<_>>()),
        );
        root.insert(UPDATED_AT.to_string(), Value::String(updated_at));
        let result = self.store.update("/", Value::Object(root)).await;
        report.record("/", result);

        info!(
            "Sync finished: {} sections written, {} failed, {} degraded summaries, {} exhausted candidates",
            report.sections_written,
            report.sections_failed,
            report.degraded_summaries(),
            self.router.state().len()
        );
        report
    }

    /// `(category, subject, search queries)` for each summary.
    fn category_queries(&self) -> Vec<(Category, String, Vec<String>)> {
        let keywords = self.profile.macro_keywords();
        let portfolio = self.profile.portfolio_names();
        let watchlist = self.profile.watchlist_names();
        vec![
            (Category::Macro, keywords.join(" / "), keywords),
            (
                Category::Portfolio,
                format!("My Portfolio ({})", portfolio.join(", ")),
                portfolio,
            ),
            (
                Category::Watchlist,
                format!("Watchlist ({})", watchlist.join(", ")),
                watchlist,
            ),
        ]
    }

    async fn collect_news(&self, queries: &[String]) -> NewsDigest {
        let mut digests = Vec::with_capacity(queries.len());
        for query in queries {
            match self.news.search(query).await {
                Ok(digest) => digests.push(digest),
                Err(NewsError::MissingApiKey { source_id }) => {
                    warn!("No API key for news source '{}', skipping news", source_id);
                    return NewsDigest::empty();
                }
                Err(e) => warn!("News search failed for '{}': {}", query, e),
            }
        }
        NewsDigest::merge(digests)
    }
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

