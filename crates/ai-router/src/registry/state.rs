//! Exhausted-candidate tracking.
//!
//! Candidates that reported quota exhaustion (or a permanent rejection) are
//! excluded for the rest of the process. Entries are never removed; the set
//! lives exactly as long as the [`RouterState`] that owns it, which in the
//! batch job is the process.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use log::{info, warn};

use crate::models::{CandidateId, CompletionOutcome};

/// Why a candidate was excluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExhaustionReason {
    /// The provider reported rate limiting or quota exhaustion.
    Quota,
    /// The provider refused the model or credentials permanently.
    Rejected,
}

impl ExhaustionReason {
    /// The exclusion an outcome calls for, if any.
    pub fn from_outcome(outcome: &CompletionOutcome) -> Option<Self> {
        match outcome {
            CompletionOutcome::QuotaExceeded => Some(Self::Quota),
            CompletionOutcome::Rejected(_) => Some(Self::Rejected),
            CompletionOutcome::Success(_)
            | CompletionOutcome::Truncated
            | CompletionOutcome::TransientFailure(_) => None,
        }
    }
}

/// Shared router state: the exhausted set.
///
/// Thread-safe; share it through `Arc` between routers or concurrent calls.
/// A fresh state is the equivalent of a fresh process.
#[derive(Debug, Default)]
pub struct RouterState {
    exhausted: Mutex<HashMap<CandidateId, ExhaustionReason>>,
}

impl RouterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the exhausted set, recovering from poison if necessary.
    ///
    /// The set is append-only, so a poisoned guard still holds a valid set.
    fn lock_exhausted(&self) -> MutexGuard<'_, HashMap<CandidateId, ExhaustionReason>> {
        self.exhausted.lock().unwrap_or_else(|poisoned| {
            warn!("Router state mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    pub fn is_exhausted(&self, id: &CandidateId) -> bool {
        self.lock_exhausted().contains_key(id)
    }

    pub fn exhaustion_reason(&self, id: &CandidateId) -> Option<ExhaustionReason> {
        self.lock_exhausted().get(id).copied()
    }

    /// Exclude a candidate for the rest of the process.
    ///
    /// Returns `true` if the candidate was not already excluded. The first
    /// recorded reason is kept.
    pub fn mark_exhausted(&self, id: CandidateId, reason: ExhaustionReason) -> bool {
        let mut exhausted = self.lock_exhausted();
        if exhausted.contains_key(&id) {
            return false;
        }
        info!("Excluding candidate '{}' for this process ({:?})", id, reason);
        exhausted.insert(id, reason);
        true
    }

    /// Snapshot of every excluded candidate, sorted by identity.
    pub fn exhausted(&self) -> Vec<(CandidateId, ExhaustionReason)> {
        let mut entries: Vec<_> = self
            .lock_exhausted()
            .iter()
            .map(|(id, reason)| (id.clone(), *reason))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    pub fn len(&self) -> usize {
        self.lock_exhausted().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_exhausted().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::Candidate;

    fn id(entry: &str) -> CandidateId {
        Candidate::parse(entry, 1).unwrap().id()
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = RouterState::new();
        assert!(state.is_empty());
        assert!(!state.is_exhausted(&id("groq/llama-3.1-8b-instant")));
    }

    #[test]
    fn test_mark_exhausted_is_idempotent() {
        let state = RouterState::new();
        let candidate = id("gemini/gemini-2.5-pro");

        assert!(state.mark_exhausted(candidate.clone(), ExhaustionReason::Quota));
        assert!(!state.mark_exhausted(candidate.clone(), ExhaustionReason::Rejected));

        assert_eq!(state.len(), 1);
        assert_eq!(
            state.exhaustion_reason(&candidate),
            Some(ExhaustionReason::Quota)
        );
    }

    #[test]
    fn test_identity_is_provider_and_model() {
        let state = RouterState::new();
        state.mark_exhausted(id("groq/openai/gpt-oss-20b"), ExhaustionReason::Quota);

        assert!(state.is_exhausted(&id("groq/openai/gpt-oss-20b")));
        assert!(!state.is_exhausted(&id("gemini/openai/gpt-oss-20b")));
    }

    #[test]
    fn test_snapshot_is_sorted() {
        let state = RouterState::new();
        state.mark_exhausted(id("groq/b"), ExhaustionReason::Quota);
        state.mark_exhausted(id("gemini/a"), ExhaustionReason::Rejected);

        let snapshot: Vec<String> = state
            .exhausted()
            .into_iter()
            .map(|(id, _)| id.to_string())
            .collect();
        assert_eq!(snapshot, vec!["gemini/a", "groq/b"]);
    }

    #[test]
    fn test_concurrent_marks_are_not_lost() {
        let state = Arc::new(RouterState::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let state = Arc::clone(&state);
                std::thread::spawn(move || {
                    state.mark_exhausted(id(&format!("groq/model-{i}")), ExhaustionReason::Quota);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(state.len(), 8);
    }

    #[test]
    fn test_reason_from_outcome() {
        assert_eq!(
            ExhaustionReason::from_outcome(&CompletionOutcome::QuotaExceeded),
            Some(ExhaustionReason::Quota)
        );
        assert_eq!(
            ExhaustionReason::from_outcome(&CompletionOutcome::Rejected("404".to_string())),
            Some(ExhaustionReason::Rejected)
        );
        assert_eq!(
            ExhaustionReason::from_outcome(&CompletionOutcome::Truncated),
            None
        );
        assert_eq!(
            ExhaustionReason::from_outcome(&CompletionOutcome::TransientFailure(
                "timeout".to_string()
            )),
            None
        );
    }
}
