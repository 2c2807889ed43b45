//! Fallback execution.
//!
//! This module provides orchestration across completion providers, including:
//! - The [`SummaryRouter`] fallback executor
//! - Process-lifetime tracking of exhausted candidates ([`RouterState`])
//! - Per-call diagnostics for debugging candidate selection

mod diagnostics;
mod router;
mod state;

pub use diagnostics::{CandidateAttempt, SkipReason, SummaryDiagnostics, SummaryReport, SummarySource};
pub use router::SummaryRouter;
pub use state::{ExhaustionReason, RouterState};
