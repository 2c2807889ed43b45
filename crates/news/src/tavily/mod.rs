//! Tavily news search client.
//!
//! Searches the `news` topic and returns the top three results. Each query is
//! suffixed with a stock-outlook phrase so results lean toward market
//! coverage.
//!
//! API documentation: https://docs.tavily.com/documentation/api-reference/endpoint/search

mod models;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::errors::NewsError;
use crate::models::{NewsArticle, NewsDigest};
use crate::source::NewsSource;
use crate::text::{build_context, strip_html};

use models::{ErrorResponse, SearchRequest, SearchResponse};

const BASE_URL: &str = "https://api.tavily.com";
const SOURCE_ID: &str = "tavily";

/// Appended to every query ("stock outlook and latest news").
pub const QUERY_SUFFIX: &str = "주가 전망 및 최신 뉴스";

pub const DEFAULT_MAX_RESULTS: u32 = 3;

pub struct TavilyClient {
    client: Client,
    api_key: String,
    base_url: String,
    max_results: u32,
}

impl TavilyClient {
    /// Create a client. A blank key makes every search fail with
    /// [`NewsError::MissingApiKey`].
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Full query sent to the API.
pub fn decorate_query(query: &str) -> String {
    format!("{} {}", query.trim(), QUERY_SUFFIX)
}

fn classify_error(status: StatusCode, body: &str) -> NewsError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.detail)
        .map(|detail| detail.message().to_string())
        .unwrap_or_else(|| body.chars().take(300).collect());

    match status.as_u16() {
        429 | 432 | 433 => NewsError::RateLimited {
            source_id: SOURCE_ID.to_string(),
        },
        code => NewsError::Http {
            source_id: SOURCE_ID.to_string(),
            status: code,
            message,
        },
    }
}

fn digest_from_response(response: SearchResponse) -> NewsDigest {
    let results: Vec<_> = response
        .results
        .into_iter()
        .map(|r| (strip_html(&r.title), r))
        .collect();

    let context = build_context(
        results
            .iter()
            .map(|(title, r)| (title.as_str(), r.content.as_str())),
    );

    let articles = results
        .into_iter()
        .map(|(title, r)| NewsArticle {
            title,
            url: r.url,
            date: r.published_date.unwrap_or_default(),
        })
        .collect();

    NewsDigest { context, articles }
}

#[async_trait]
impl NewsSource for TavilyClient {
    fn id(&self) -> &'static str {
        SOURCE_ID
    }

    async fn search(&self, query: &str) -> Result<NewsDigest, NewsError> {
        if !self.has_api_key() {
            return Err(NewsError::MissingApiKey {
                source_id: SOURCE_ID.to_string(),
            });
        }

        let body = SearchRequest {
            query: decorate_query(query),
            topic: "news",
            max_results: self.max_results,
            include_answer: false,
            include_raw_content: false,
        };

        debug!("Tavily search: {}", body.query);

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| NewsError::from_reqwest(SOURCE_ID, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| NewsError::from_reqwest(SOURCE_ID, e))?;

        if !status.is_success() {
            let error = classify_error(status, &text);
            warn!("Tavily search failed for '{}': {}", query, error);
            return Err(error);
        }

        let parsed: SearchResponse =
            serde_json::from_str(&text).map_err(|e| NewsError::MalformedResponse {
                source_id: SOURCE_ID.to_string(),
                message: e.to_string(),
            })?;

        Ok(digest_from_response(parsed))
    }
}
