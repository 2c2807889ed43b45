//! Tavily search API wire types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct SearchRequest<'a> {
    pub query: String,
    pub topic: &'a str,
    pub max_results: u32,
    pub include_answer: bool,
    pub include_raw_content: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub published_date: Option<String>,
}

/// Error body, e.g. `{"detail": {"error": "Invalid API key"}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub detail: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ErrorDetail {
    Message { error: String },
    Text(String),
}

impl ErrorDetail {
    pub fn message(&self) -> &str {
        match self {
            Self::Message { error } => error,
            Self::Text(text) => text,
        }
    }
}
