//! End-to-end fallback behavior of the summary router against scripted
//! provider adapters.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use stocksync_ai_router::{
    build_request, Candidate, Category, CompletionOutcome, CompletionProvider, CompletionRequest,
    GenerationSettings, ModelSelector, RouterState, SelectionPolicy, SummaryRouter,
    EXHAUSTED_MESSAGE, NO_DATA_MESSAGE, UNCONFIGURED_MESSAGE,
};

// =============================================================================
// Test Harness
// =============================================================================

/// Adapter that answers each model from a fixed script and counts calls per
/// model.
struct ScriptedProvider {
    id: &'static str,
    script: HashMap<String, CompletionOutcome>,
    calls: Mutex<HashMap<String, usize>>,
}

impl ScriptedProvider {
    fn new(id: &'static str, script: &[(&str, CompletionOutcome)]) -> Arc<Self> {
        Arc::new(Self {
            id,
            script: script
                .iter()
                .map(|(model, outcome)| (model.to_string(), outcome.clone()))
                .collect(),
            calls: Mutex::new(HashMap::new()),
        })
    }

    fn calls_for(&self, model: &str) -> usize {
        self.calls.lock().unwrap().get(model).copied().unwrap_or(0)
    }

    fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn id(&self) -> &'static str {
        self.id
    }

    async fn complete(
        &self,
        candidate: &Candidate,
        _request: &CompletionRequest,
    ) -> CompletionOutcome {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(candidate.model_id.clone())
            .or_insert(0) += 1;
        self.script
            .get(&candidate.model_id)
            .cloned()
            .unwrap_or_else(|| CompletionOutcome::TransientFailure("HTTP 503".to_string()))
    }
}

fn default_chain_selector(chain: &[&str]) -> ModelSelector {
    let policy = SelectionPolicy::new(
        HashMap::new(),
        chain.iter().map(|entry| entry.to_string()).collect(),
    )
    .unwrap();
    ModelSelector::new(policy)
}

fn news_request() -> CompletionRequest {
    build_request(
        "Global Market Trends",
        "[1. Fed holds rates]\nThe Federal Reserve kept rates unchanged.",
        &GenerationSettings::default(),
    )
}

// =============================================================================
// Short-circuits
// =============================================================================

#[tokio::test]
async fn empty_context_never_calls_a_provider() {
    let provider = ScriptedProvider::new(
        "gemini",
        &[("a", CompletionOutcome::Success("unused".to_string()))],
    );
    let router = SummaryRouter::new(
        vec![provider.clone()],
        default_chain_selector(&["gemini/a"]),
        Arc::new(RouterState::new()),
    );

    let request = build_request("Portfolio", "", &GenerationSettings::default());
    let text = router.summarize(&Category::Portfolio, &request).await;

    assert_eq!(text, NO_DATA_MESSAGE);
    assert_eq!(provider.total_calls(), 0);
}

#[tokio::test]
async fn no_registered_providers_yields_configuration_message() {
    let router = SummaryRouter::new(
        Vec::new(),
        ModelSelector::default(),
        Arc::new(RouterState::new()),
    );

    let text = router.summarize(&Category::Macro, &news_request()).await;
    assert_eq!(text, UNCONFIGURED_MESSAGE);
}

// =============================================================================
// Fallback Order
// =============================================================================

#[tokio::test]
async fn first_success_is_returned_verbatim() {
    let provider = ScriptedProvider::new(
        "gemini",
        &[
            ("a", CompletionOutcome::Success("X".to_string())),
            ("b", CompletionOutcome::Success("unused".to_string())),
        ],
    );
    let router = SummaryRouter::new(
        vec![provider.clone()],
        default_chain_selector(&["gemini/a", "gemini/b"]),
        Arc::new(RouterState::new()),
    );

    let text = router.summarize(&Category::Macro, &news_request()).await;

    assert_eq!(text, "X");
    assert_eq!(provider.calls_for("a"), 1);
    assert_eq!(provider.calls_for("b"), 0);
}

#[tokio::test]
async fn quota_failure_falls_through_and_is_remembered() {
    let provider = ScriptedProvider::new(
        "gemini",
        &[
            ("a", CompletionOutcome::QuotaExceeded),
            ("b", CompletionOutcome::Success("Y".to_string())),
        ],
    );
    let router = SummaryRouter::new(
        vec![provider.clone()],
        default_chain_selector(&["gemini/a", "gemini/b"]),
        Arc::new(RouterState::new()),
    );

    assert_eq!(router.summarize(&Category::Macro, &news_request()).await, "Y");
    assert_eq!(provider.calls_for("a"), 1);

    assert_eq!(router.summarize(&Category::Macro, &news_request()).await, "Y");
    assert_eq!(provider.calls_for("a"), 1, "exhausted candidate was retried");
    assert_eq!(provider.calls_for("b"), 2);
}

#[tokio::test]
async fn truncated_candidate_stays_eligible() {
    let provider = ScriptedProvider::new(
        "groq",
        &[
            ("a", CompletionOutcome::Truncated),
            ("b", CompletionOutcome::Success("Z".to_string())),
        ],
    );
    let router = SummaryRouter::new(
        vec![provider.clone()],
        default_chain_selector(&["groq/a", "groq/b"]),
        Arc::new(RouterState::new()),
    );

    router.summarize(&Category::Macro, &news_request()).await;
    router.summarize(&Category::Macro, &news_request()).await;

    assert_eq!(provider.calls_for("a"), 2);
    assert!(router.state().is_empty());
}

#[tokio::test]
async fn all_candidates_failing_yields_exhausted_message() {
    let provider = ScriptedProvider::new(
        "gemini",
        &[
            ("a", CompletionOutcome::QuotaExceeded),
            ("b", CompletionOutcome::TransientFailure("timeout".to_string())),
        ],
    );
    let router = SummaryRouter::new(
        vec![provider.clone()],
        default_chain_selector(&["gemini/a", "gemini/b"]),
        Arc::new(RouterState::new()),
    );

    let text = router.summarize(&Category::Watchlist, &news_request()).await;

    assert_eq!(text, EXHAUSTED_MESSAGE);
    assert_ne!(text, NO_DATA_MESSAGE);
    assert_ne!(text, UNCONFIGURED_MESSAGE);
}

#[tokio::test]
async fn repeated_successful_calls_are_idempotent() {
    let provider = ScriptedProvider::new(
        "gemini",
        &[
            ("a", CompletionOutcome::TransientFailure("blip".to_string())),
            ("b", CompletionOutcome::Success("stable".to_string())),
        ],
    );
    let router = SummaryRouter::new(
        vec![provider.clone()],
        default_chain_selector(&["gemini/a", "gemini/b"]),
        Arc::new(RouterState::new()),
    );

    let first = router.summarize(&Category::Macro, &news_request()).await;
    let calls_after_first = provider.total_calls();
    let second = router.summarize(&Category::Macro, &news_request()).await;
    let calls_for_second = provider.total_calls() - calls_after_first;

    assert_eq!(first, second);
    assert_eq!(calls_after_first, calls_for_second);
}

// =============================================================================
// Process-wide Exhaustion
// =============================================================================

#[tokio::test]
async fn exhausted_candidate_is_skipped_across_categories() {
    // Only gemini-2.5-pro answers at all, and it always reports quota.
    let gemini = ScriptedProvider::new(
        "gemini",
        &[("gemini-2.5-pro", CompletionOutcome::QuotaExceeded)],
    );
    let groq = ScriptedProvider::new("groq", &[]);
    let router = SummaryRouter::new(
        vec![gemini.clone(), groq.clone()],
        ModelSelector::default(),
        Arc::new(RouterState::new()),
    );

    let macro_chain = router.selector().select(&Category::Macro);
    assert_eq!(macro_chain[0].to_string(), "gemini/gemini-2.5-pro");

    router.summarize(&Category::Macro, &news_request()).await;
    assert_eq!(gemini.calls_for("gemini-2.5-pro"), 1);

    router.summarize(&Category::Macro, &news_request()).await;
    router.summarize(&Category::Portfolio, &news_request()).await;
    router.summarize(&Category::Watchlist, &news_request()).await;

    assert_eq!(gemini.calls_for("gemini-2.5-pro"), 1);
    // Transient failures are never remembered.
    assert_eq!(gemini.calls_for("gemini-3-flash-preview"), 4);
    assert_eq!(groq.calls_for("llama-3.1-8b-instant"), 4);
}

#[tokio::test]
async fn shared_state_spans_routers() {
    let state = Arc::new(RouterState::new());
    let provider = ScriptedProvider::new(
        "gemini",
        &[
            ("a", CompletionOutcome::QuotaExceeded),
            ("b", CompletionOutcome::Success("ok".to_string())),
        ],
    );
    let selector = default_chain_selector(&["gemini/a", "gemini/b"]);

    let first = SummaryRouter::new(vec![provider.clone()], selector.clone(), state.clone());
    let second = SummaryRouter::new(vec![provider.clone()], selector, state.clone());

    first.summarize(&Category::Macro, &news_request()).await;
    second.summarize(&Category::Macro, &news_request()).await;

    assert_eq!(provider.calls_for("a"), 1);
    assert_eq!(state.len(), 1);
}

#[tokio::test]
async fn fresh_state_forgets_exhaustion() {
    let provider = ScriptedProvider::new("gemini", &[("a", CompletionOutcome::QuotaExceeded)]);
    let selector = default_chain_selector(&["gemini/a"]);

    for _ in 0..2 {
        let router = SummaryRouter::new(
            vec![provider.clone()],
            selector.clone(),
            Arc::new(RouterState::new()),
        );
        router.summarize(&Category::Macro, &news_request()).await;
    }

    assert_eq!(provider.calls_for("a"), 2);
}
