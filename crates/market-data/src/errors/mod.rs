//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while fetching quotes.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The symbol exists but the provider returned no usable bars.
    #[error("No data for symbol: {0}")]
    NoData(String),

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider returned data that failed validation checks.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },
}

impl MarketDataError {
    /// Whether the error means the symbol itself is unusable, as opposed to a
    /// provider or network failure.
    pub fn is_symbol_error(&self) -> bool {
        matches!(self, Self::SymbolNotFound(_) | Self::NoData(_))
    }
}
