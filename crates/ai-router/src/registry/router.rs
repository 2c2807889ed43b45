//! Fallback executor for summary generation.
//!
//! The router owns the registered provider adapters, the model selector and a
//! handle to the shared [`RouterState`]. A summary call:
//! - Returns a fixed message without any network call when no provider is
//!   configured or the request has no payload
//! - Walks the category's chain in priority order, one candidate at a time
//! - Skips candidates already in the exhausted set, or whose provider family
//!   has no registered adapter
//! - Returns the first successful text
//! - Excludes quota-exhausted or rejected candidates for the rest of the
//!   process and moves on
//! - Falls back to the exhausted message when nothing in the chain succeeds

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info, warn};

use super::{RouterState, SkipReason, SummaryDiagnostics, SummaryReport};
use crate::errors::FallbackClass;
use crate::models::{Category, CompletionRequest, DegradedReason};
use crate::provider::CompletionProvider;
use crate::registry::ExhaustionReason;
use crate::selector::ModelSelector;

/// Routes summary requests across provider families with ordered fallback.
pub struct SummaryRouter {
    providers: HashMap<&'static str, Arc<dyn CompletionProvider>>,
    selector: ModelSelector,
    state: Arc<RouterState>,
}

impl SummaryRouter {
    /// Create a router.
    ///
    /// # Arguments
    ///
    /// * `providers` - Adapters for the provider families that have credentials.
    ///   A later adapter with the same id replaces an earlier one.
    /// * `selector` - Candidate chains per category
    /// * `state` - Exhausted set shared with every other router of the process
    pub fn new(
        providers: Vec<Arc<dyn CompletionProvider>>,
        selector: ModelSelector,
        state: Arc<RouterState>,
    ) -> Self {
        let providers = providers
            .into_iter()
            .map(|provider| (provider.id(), provider))
            .collect();
        Self {
            providers,
            selector,
            state,
        }
    }

    /// Whether at least one provider family is usable.
    pub fn is_configured(&self) -> bool {
        !self.providers.is_empty()
    }

    /// Ids of the registered provider families, sorted.
    pub fn provider_ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.providers.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn selector(&self) -> &ModelSelector {
        &self.selector
    }

    pub fn state(&self) -> &Arc<RouterState> {
        &self.state
    }

    /// Produce summary text for `category`.
    ///
    /// Never fails: when no model can produce text, one of the fixed degraded
    /// messages is returned instead.
    pub async fn summarize(&self, category: &Category, request: &CompletionRequest) -> String {
        self.summarize_with_diagnostics(category, request).await.text
    }

    /// Same as [`summarize`](Self::summarize), keeping the per-candidate trace.
    pub async fn summarize_with_diagnostics(
        &self,
        category: &Category,
        request: &CompletionRequest,
    ) -> SummaryReport {
        let mut diagnostics = SummaryDiagnostics::new();

        if !self.is_configured() {
            warn!(
                "No completion providers configured, skipping summary for '{}'",
                category
            );
            return SummaryReport::degraded(
                category.clone(),
                DegradedReason::Unconfigured,
                diagnostics,
            );
        }

        if !request.has_payload() {
            info!("No context to summarize for '{}'", category);
            return SummaryReport::degraded(category.clone(), DegradedReason::NoData, diagnostics);
        }

        for candidate in self.selector.select(category) {
            let id = candidate.id();

            if let Some(reason) = self.state.exhaustion_reason(&id) {
                debug!("Candidate '{}' is exhausted ({:?}), skipping", id, reason);
                diagnostics.record_skip(candidate, SkipReason::Exhausted(reason));
                continue;
            }

            let Some(provider) = self.providers.get(&*candidate.provider_id) else {
                debug!(
                    "Provider '{}' is not configured, skipping '{}'",
                    candidate.provider_id, id
                );
                diagnostics.record_skip(candidate, SkipReason::ProviderNotConfigured);
                continue;
            };

            debug!(
                "Requesting '{}' summary from '{}' (rank {})",
                category, id, candidate.priority_rank
            );

            let outcome = provider.complete(&candidate, request).await;

            match outcome.fallback_class() {
                FallbackClass::Return => {
                    info!("Generated '{}' summary with '{}'", category, id);
                    let text = outcome.text().unwrap_or_default().to_string();
                    diagnostics.record_outcome(candidate.clone(), outcome);
                    return SummaryReport::generated(
                        category.clone(),
                        text,
                        candidate,
                        diagnostics,
                    );
                }
                FallbackClass::ExcludeAndContinue => {
                    if let Some(reason) = ExhaustionReason::from_outcome(&outcome) {
                        self.state.mark_exhausted(id, reason);
                    }
                }
                FallbackClass::Continue => {
                    debug!(
                        "Candidate '{}' returned {}, trying next",
                        id,
                        outcome.label()
                    );
                }
            }

            diagnostics.record_outcome(candidate, outcome);
        }

        warn!(
            "All candidates failed for '{}': {}",
            category,
            diagnostics.summary()
        );
        SummaryReport::degraded(category.clone(), DegradedReason::Exhausted, diagnostics)
    }
}
