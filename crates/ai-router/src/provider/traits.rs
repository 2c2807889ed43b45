//! Completion provider trait definitions.

use async_trait::async_trait;

use crate::models::{Candidate, CompletionOutcome, CompletionRequest};

/// Trait for language-model backends.
///
/// Implement this trait to add a provider family. The router looks providers
/// up by [`id`](Self::id), which must match the provider prefix used in the
/// model policy (`gemini/...`, `groq/...`).
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use stocksync_ai_router::{Candidate, CompletionOutcome, CompletionProvider, CompletionRequest};
///
/// struct EchoProvider;
///
/// #[async_trait]
/// impl CompletionProvider for EchoProvider {
///     fn id(&self) -> &'static str {
///         "echo"
///     }
///
///     async fn complete(
///         &self,
///         _candidate: &Candidate,
///         request: &CompletionRequest,
///     ) -> CompletionOutcome {
///         CompletionOutcome::Success(request.user_prompt.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider family identifier, lowercase (e.g. "gemini", "groq").
    fn id(&self) -> &'static str;

    /// Run one completion against `candidate.model_id`.
    ///
    /// Performs exactly one network call. Never panics or returns an error:
    /// every failure is folded into a [`CompletionOutcome`] variant.
    async fn complete(&self, candidate: &Candidate, request: &CompletionRequest)
        -> CompletionOutcome;
}
