//! Error types and fallback classification for the summary router.
//!
//! This module provides:
//! - [`ProviderError`]: wire-level failures inside a provider adapter
//! - [`RouterError`]: model policy loading and validation failures
//! - [`FallbackClass`]: how the executor reacts to each completion outcome

mod fallback;

pub use fallback::FallbackClass;

use thiserror::Error;

use crate::models::CompletionOutcome;

/// Failures a provider adapter can hit while talking to its backend.
///
/// These never leave the adapter. Each variant is folded into a
/// [`CompletionOutcome`] via [`outcome`](Self::outcome) at the adapter
/// boundary, so the executor never sees provider-specific error text.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited { provider: String },

    /// The provider reported the account or model quota as used up.
    #[error("Quota exhausted: {provider} - {message}")]
    QuotaExhausted { provider: String, message: String },

    /// The provider does not know the requested model.
    #[error("Model not found: {provider}/{model}")]
    ModelNotFound { provider: String, model: String },

    /// The provider rejected the credentials (HTTP 401/403).
    #[error("Unauthorized: {provider} - {message}")]
    Unauthorized { provider: String, message: String },

    /// The request timed out at the transport layer.
    #[error("Timeout: {provider}")]
    Timeout { provider: String },

    /// Any other non-success HTTP status.
    #[error("HTTP {status} from {provider}: {message}")]
    Http {
        provider: String,
        status: u16,
        message: String,
    },

    /// Connection-level failure before a response arrived.
    #[error("Network error: {provider} - {message}")]
    Network { provider: String, message: String },

    /// The response body did not match the provider's envelope.
    #[error("Malformed response from {provider}: {message}")]
    MalformedResponse { provider: String, message: String },

    /// The provider answered without any text.
    #[error("Empty response from {provider}: {message}")]
    EmptyResponse { provider: String, message: String },
}

impl ProviderError {
    /// Map a transport error, keeping timeouts distinct.
    pub fn from_reqwest(provider: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                provider: provider.to_string(),
            }
        } else {
            Self::Network {
                provider: provider.to_string(),
                message: error.to_string(),
            }
        }
    }

    /// Normalize into the outcome the fallback executor understands.
    ///
    /// # Examples
    ///
    /// ```
    /// use stocksync_ai_router::errors::ProviderError;
    /// use stocksync_ai_router::CompletionOutcome;
    ///
    /// let error = ProviderError::RateLimited { provider: "groq".to_string() };
    /// assert_eq!(error.outcome(), CompletionOutcome::QuotaExceeded);
    /// ```
    pub fn outcome(&self) -> CompletionOutcome {
        match self {
            Self::RateLimited { .. } | Self::QuotaExhausted { .. } => {
                CompletionOutcome::QuotaExceeded
            }
            Self::ModelNotFound { .. } | Self::Unauthorized { .. } => {
                CompletionOutcome::Rejected(self.to_string())
            }
            Self::Timeout { .. }
            | Self::Http { .. }
            | Self::Network { .. }
            | Self::MalformedResponse { .. }
            | Self::EmptyResponse { .. } => CompletionOutcome::TransientFailure(self.to_string()),
        }
    }
}

impl From<ProviderError> for CompletionOutcome {
    fn from(error: ProviderError) -> Self {
        error.outcome()
    }
}

/// Errors raised while loading or validating a model policy.
#[derive(Error, Debug)]
pub enum RouterError {
    #[error("Failed to read model policy {path}: {source}")]
    PolicyRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse model policy: {0}")]
    PolicyParse(#[from] serde_json::Error),

    /// An entry is not of the form `provider/model`.
    #[error("Invalid candidate '{entry}' in category '{category}'")]
    InvalidCandidate { category: String, entry: String },

    #[error("Category '{0}' has no candidates")]
    EmptyCategory(String),

    /// Two category keys are the same once trimmed and lowercased.
    #[error("Category '{0}' is listed more than once")]
    DuplicateCategory(String),

    #[error("Duplicate candidate '{entry}' in category '{category}'")]
    DuplicateCandidate { category: String, entry: String },
}
