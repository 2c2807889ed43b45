//! Per-call diagnostics for the fallback chain.

use crate::models::{Candidate, Category, CompletionOutcome, DegradedReason};

use super::ExhaustionReason;

/// Why a candidate was skipped without a network call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Excluded earlier in this process.
    Exhausted(ExhaustionReason),

    /// No adapter is registered for the candidate's provider family
    /// (typically: no API key configured for it).
    ProviderNotConfigured,
}

/// Record of one candidate within a summary call.
#[derive(Clone, Debug)]
pub struct CandidateAttempt {
    pub candidate: Candidate,
    pub skipped: Option<SkipReason>,
    pub outcome: Option<CompletionOutcome>,
}

impl CandidateAttempt {
    pub fn was_tried(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Detailed trace of a summary call.
#[derive(Clone, Debug, Default)]
pub struct SummaryDiagnostics {
    pub attempts: Vec<CandidateAttempt>,
}

impl SummaryDiagnostics {
    pub fn new() -> Self {
        Self {
            attempts: Vec::new(),
        }
    }

    pub fn record_skip(&mut self, candidate: Candidate, reason: SkipReason) {
        self.attempts.push(CandidateAttempt {
            candidate,
            skipped: Some(reason),
            outcome: None,
        });
    }

    pub fn record_outcome(&mut self, candidate: Candidate, outcome: CompletionOutcome) {
        self.attempts.push(CandidateAttempt {
            candidate,
            skipped: None,
            outcome: Some(outcome),
        });
    }

    /// Summary for logging/debugging.
    pub fn summary(&self) -> String {
        if self.attempts.is_empty() {
            return "no candidates attempted".to_string();
        }

        self.attempts
            .iter()
            .map(|a| match (&a.skipped, &a.outcome) {
                (Some(skip), _) => format!("{}: SKIPPED ({:?})", a.candidate, skip),
                (None, Some(CompletionOutcome::Success(_))) => {
                    format!("{}: SUCCESS", a.candidate)
                }
                (None, Some(outcome)) => match outcome.detail() {
                    Some(detail) => format!("{}: {} ({})", a.candidate, outcome.label(), detail),
                    None => format!("{}: {}", a.candidate, outcome.label()),
                },
                (None, None) => format!("{}: UNKNOWN", a.candidate),
            })
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// Number of candidates that reached a provider.
    pub fn tried_count(&self) -> usize {
        self.attempts.iter().filter(|a| a.was_tried()).count()
    }

    pub fn has_success(&self) -> bool {
        self.attempts
            .iter()
            .any(|a| matches!(a.outcome, Some(CompletionOutcome::Success(_))))
    }

    pub fn skip_reasons(&self) -> Vec<(&Candidate, &SkipReason)> {
        self.attempts
            .iter()
            .filter_map(|a| a.skipped.as_ref().map(|s| (&a.candidate, s)))
            .collect()
    }
}

/// Where the text of a summary came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SummarySource {
    Generated(Candidate),
    Degraded(DegradedReason),
}

/// Result of a summary call with its diagnostics.
#[derive(Clone, Debug)]
pub struct SummaryReport {
    pub category: Category,
    /// Model output, or the fixed message for the degraded reason.
    pub text: String,
    pub source: SummarySource,
    pub diagnostics: SummaryDiagnostics,
}

impl SummaryReport {
    pub(crate) fn generated(
        category: Category,
        text: String,
        candidate: Candidate,
        diagnostics: SummaryDiagnostics,
    ) -> Self {
        Self {
            category,
            text,
            source: SummarySource::Generated(candidate),
            diagnostics,
        }
    }

    pub(crate) fn degraded(
        category: Category,
        reason: DegradedReason,
        diagnostics: SummaryDiagnostics,
    ) -> Self {
        Self {
            category,
            text: reason.message().to_string(),
            source: SummarySource::Degraded(reason),
            diagnostics,
        }
    }

    pub fn degraded_reason(&self) -> Option<DegradedReason> {
        match self.source {
            SummarySource::Degraded(reason) => Some(reason),
            SummarySource::Generated(_) => None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded_reason().is_some()
    }
}
