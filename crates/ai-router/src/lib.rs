//! StockSync AI Router Crate
//!
//! Produces short market summaries from one of several hosted LLM backends,
//! falling back across models and providers when one is rate-limited, out of
//! quota, or failing.
//!
//! # Overview
//!
//! The router supports:
//! - Category-specific candidate chains (macro, portfolio, watchlist, ...)
//! - Multiple provider families: Gemini and OpenAI-compatible backends (Groq)
//! - Process-wide exclusion of candidates that reported quota exhaustion
//! - Fixed, distinguishable messages when no summary can be produced
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |    Category      | --> |  ModelSelector   |  (ordered candidate chain)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  SummaryRouter   |  (fallback executor)
//!                          +------------------+
//!                             |            |
//!                             v            v
//!                  +----------------+  +------------------+
//!                  |  RouterState   |  |    Provider      |  (Gemini, Groq)
//!                  | (exhausted set)|  +------------------+
//!                  +----------------+          |
//!                                              v
//!                                  +---------------------+
//!                                  |  CompletionOutcome  |  (normalized)
//!                                  +---------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Candidate`] - One `(provider, model)` pair in a chain
//! - [`Category`] - Routing key of a summary request
//! - [`CompletionRequest`] - Prompt plus generation settings
//! - [`CompletionOutcome`] - Normalized result of one provider call
//! - [`RouterState`] - Exhausted set shared by every call of the process
//! - [`SummaryReport`] - Summary text with its per-candidate trace

pub mod errors;
pub mod models;
pub mod provider;
pub mod registry;
pub mod selector;

pub use models::{
    build_request, Candidate, CandidateId, Category, CompletionOutcome, CompletionRequest,
    DegradedReason, GenerationSettings, ProviderId, DEFAULT_MAX_OUTPUT_TOKENS,
    DEFAULT_TEMPERATURE, EXHAUSTED_MESSAGE, NO_DATA_MESSAGE, UNCONFIGURED_MESSAGE,
};

pub use errors::{FallbackClass, ProviderError, RouterError};

pub use provider::{CompletionProvider, GeminiProvider, OpenAiCompatibleProvider};

pub use registry::{
    CandidateAttempt, ExhaustionReason, RouterState, SkipReason, SummaryDiagnostics,
    SummaryReport, SummaryRouter, SummarySource,
};

pub use selector::{ModelSelector, SelectionPolicy};
