use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use stocksync_ai_router::{GenerationSettings, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE};
use stocksync_news::DEFAULT_MAX_RESULTS;

pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

/// Runtime configuration, read from the environment (and `.env`).
#[derive(Clone, Debug)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub groq_api_key: Option<String>,
    pub tavily_api_key: Option<String>,
    pub firebase_database_url: Option<String>,
    pub firebase_auth_token: Option<String>,
    /// Replaces the built-in model policy when set.
    pub model_policy_path: Option<PathBuf>,
    /// Replaces the built-in user profile when set.
    pub profile_path: Option<PathBuf>,
    pub generation: GenerationSettings,
    pub llm_timeout: Duration,
    /// Articles requested per news search.
    pub news_max_results: u32,
    /// Write to memory and print the feed instead of uploading it.
    pub dry_run: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let max_output_tokens = match var("SYNC_MAX_OUTPUT_TOKENS") {
            Some(v) => v
                .parse::<u32>()
                .with_context(|| format!("Invalid SYNC_MAX_OUTPUT_TOKENS: {}", v))?,
            None => DEFAULT_MAX_OUTPUT_TOKENS,
        };
        if max_output_tokens == 0 {
            bail!("SYNC_MAX_OUTPUT_TOKENS must be greater than zero");
        }

        let temperature = match var("SYNC_TEMPERATURE") {
            Some(v) => v
                .parse::<f32>()
                .with_context(|| format!("Invalid SYNC_TEMPERATURE: {}", v))?,
            None => DEFAULT_TEMPERATURE,
        };
        if !(0.0..=2.0).contains(&temperature) {
            bail!("SYNC_TEMPERATURE must be between 0 and 2, got {}", temperature);
        }

        let timeout_secs = match var("SYNC_LLM_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .with_context(|| format!("Invalid SYNC_LLM_TIMEOUT_SECS: {}", v))?,
            None => DEFAULT_LLM_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            bail!("SYNC_LLM_TIMEOUT_SECS must be greater than zero");
        }

        let news_max_results = match var("SYNC_NEWS_MAX_RESULTS") {
            Some(v) => v
                .parse::<u32>()
                .with_context(|| format!("Invalid SYNC_NEWS_MAX_RESULTS: {}", v))?,
            None => DEFAULT_MAX_RESULTS,
        };
        if news_max_results == 0 {
            bail!("SYNC_NEWS_MAX_RESULTS must be greater than zero");
        }

        let dry_run = match var("SYNC_DRY_RUN").as_deref() {
            None => false,
            Some("1") | Some("true") | Some("yes") => true,
            Some("0") | Some("false") | Some("no") => false,
            Some(other) => bail!("Invalid SYNC_DRY_RUN: {}", other),
        };

        let firebase_database_url = var("FIREBASE_DATABASE_URL");
        if !dry_run && firebase_database_url.is_none() {
            bail!("FIREBASE_DATABASE_URL is required unless SYNC_DRY_RUN is set");
        }

        Ok(Self {
            gemini_api_key: var("GEMINI_API_KEY"),
            groq_api_key: var("GROQ_API_KEY"),
            tavily_api_key: var("TAVILY_API_KEY"),
            firebase_database_url,
            firebase_auth_token: var("FIREBASE_AUTH_TOKEN"),
            model_policy_path: var("SYNC_MODEL_POLICY").map(PathBuf::from),
            profile_path: var("SYNC_PROFILE").map(PathBuf::from),
            generation: GenerationSettings {
                max_output_tokens,
                temperature,
            },
            llm_timeout: Duration::from_secs(timeout_secs),
            news_max_results,
            dry_run,
        })
    }
}
