//! Domain models for the summary router.
//!
//! This module contains:
//! - Candidate identities and the [`ProviderId`] alias
//! - The [`Category`] routing key
//! - Completion requests and the prompt builder
//! - Normalized completion outcomes and degraded-summary reasons

mod candidate;
mod category;
mod outcome;
mod request;
mod summary;

pub use candidate::{Candidate, CandidateId, ProviderId};
pub use category::Category;
pub use outcome::CompletionOutcome;
pub use request::{
    build_request, CompletionRequest, GenerationSettings, DEFAULT_MAX_OUTPUT_TOKENS,
    DEFAULT_TEMPERATURE,
};
pub use summary::{
    DegradedReason, EXHAUSTED_MESSAGE, NO_DATA_MESSAGE, UNCONFIGURED_MESSAGE,
};
