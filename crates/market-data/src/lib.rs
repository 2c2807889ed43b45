//! StockSync Market Data Crate
//!
//! Latest quotes for the symbols, indices and indicators the sync job
//! tracks.
//!
//! # Core Types
//!
//! - [`QuoteSnapshot`] - Last price, previous close and volume of a symbol
//! - [`IndexValue`] - Rounded index value as written to the feed
//! - [`QuoteProvider`] - Source of snapshots (Yahoo Finance)
//! - [`MarketDataService`] - Batch collection with per-symbol error isolation

pub mod errors;
pub mod models;
pub mod provider;
pub mod service;

pub use errors::MarketDataError;
pub use models::{calc_change_percent, IndexValue, QuoteSnapshot, UPDATED_AT_FORMAT};
pub use provider::yahoo::YahooProvider;
pub use provider::QuoteProvider;
pub use service::{rank_by_volume, MarketDataService};
