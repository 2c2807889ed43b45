//! Quote provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::QuoteSnapshot;

/// Trait for quote providers.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use stocksync_market_data::provider::QuoteProvider;
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl QuoteProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     async fn latest_snapshot(&self, symbol: &str) -> Result<QuoteSnapshot, MarketDataError> {
///         // ... fetch the last two daily bars
///     }
/// }
/// ```
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Unique identifier for this provider, e.g. "YAHOO".
    fn id(&self) -> &'static str;

    /// Latest price, previous close and volume for `symbol`.
    async fn latest_snapshot(&self, symbol: &str) -> Result<QuoteSnapshot, MarketDataError>;
}
