use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use stocksync_ai_router::{
    CompletionProvider, GeminiProvider, ModelSelector, OpenAiCompatibleProvider, RouterState,
    SelectionPolicy, SummaryRouter,
};
use stocksync_market_data::{MarketDataService, YahooProvider};
use stocksync_news::TavilyClient;
use stocksync_storage::{FeedStore, FirebaseStore, MemoryStore};

use crate::config::Config;
use crate::markets::MarketConfig;
use crate::profile::Profile;
use crate::sync::SyncJob;

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Adapters for every provider family with a configured key.
pub fn build_providers(config: &Config) -> Vec<Arc<dyn CompletionProvider>> {
    let mut providers: Vec<Arc<dyn CompletionProvider>> = Vec::new();
    if let Some(key) = &config.gemini_api_key {
        providers.push(Arc::new(GeminiProvider::with_timeout(
            key.clone(),
            config.llm_timeout,
        )));
    }
    if let Some(key) = &config.groq_api_key {
        providers.push(Arc::new(OpenAiCompatibleProvider::groq_with_timeout(
            key.clone(),
            config.llm_timeout,
        )));
    }
    providers
}

pub fn build_router(config: &Config, state: Arc<RouterState>) -> anyhow::Result<SummaryRouter> {
    let policy = match &config.model_policy_path {
        Some(path) => SelectionPolicy::from_file(path)
            .with_context(|| format!("Failed to load model policy {}", path.display()))?,
        None => SelectionPolicy::reference().clone(),
    };

    let providers = build_providers(config);
    let router = SummaryRouter::new(providers, ModelSelector::new(policy), state);
    info!(
        "Summary router ready with providers {:?}",
        router.provider_ids()
    );
    Ok(router)
}

/// Feed store plus, for dry runs, a handle to read the result back.
pub struct StoreHandle {
    pub store: Arc<dyn FeedStore>,
    pub memory: Option<Arc<MemoryStore>>,
}

pub fn build_store(config: &Config) -> anyhow::Result<StoreHandle> {
    if config.dry_run {
        let memory = Arc::new(MemoryStore::new());
        return Ok(StoreHandle {
            store: memory.clone(),
            memory: Some(memory),
        });
    }

    let url = config
        .firebase_database_url
        .as_deref()
        .context("FIREBASE_DATABASE_URL is not set")?;
    Ok(StoreHandle {
        store: Arc::new(FirebaseStore::new(url, config.firebase_auth_token.clone())),
        memory: None,
    })
}

pub fn load_profile(config: &Config) -> anyhow::Result<Profile> {
    match &config.profile_path {
        Some(path) => Profile::from_file(path),
        None => Profile::builtin(),
    }
}

pub fn build_job(config: &Config, store: Arc<dyn FeedStore>) -> anyhow::Result<SyncJob> {
    let yahoo = YahooProvider::new().context("Failed to initialize Yahoo provider")?;
    let news = TavilyClient::new(config.tavily_api_key.clone().unwrap_or_default())
        .with_max_results(config.news_max_results);

    Ok(SyncJob {
        market: MarketDataService::new(Arc::new(yahoo)),
        news: Arc::new(news),
        router: build_router(config, Arc::new(RouterState::new()))?,
        store,
        profile: load_profile(config)?,
        markets: MarketConfig::default(),
        generation: config.generation.clone(),
    })
}
