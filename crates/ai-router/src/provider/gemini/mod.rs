//! Google Gemini completion provider.
//!
//! Calls the Generative Language REST API (`models/{model}:generateContent`)
//! with the API key in the `x-goog-api-key` header.
//!
//! Classification:
//! - `finishReason: MAX_TOKENS` -> truncated, even when text is present
//! - HTTP 429 or error status `RESOURCE_EXHAUSTED` -> quota exceeded
//! - HTTP 404 / `NOT_FOUND` and rejected keys -> rejected
//! - everything else -> transient failure

mod models;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::errors::ProviderError;
use crate::models::{Candidate, CompletionOutcome, CompletionRequest};
use crate::provider::{http_client, truncate_detail, CompletionProvider, DEFAULT_REQUEST_TIMEOUT};

use models::{
    Content, ErrorEnvelope, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    Part,
};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const PROVIDER_ID: &str = "gemini";

/// Google Gemini provider.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiProvider {
    /// Create a provider with the default transport timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_timeout(api_key, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the provider at a different API root (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn send(
        &self,
        model: &str,
        request: &CompletionRequest,
    ) -> Result<(StatusCode, String), ProviderError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let body = build_body(request);

        debug!("Gemini request: model={}", model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER_ID, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER_ID, e))?;

        Ok((status, text))
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn complete(
        &self,
        candidate: &Candidate,
        request: &CompletionRequest,
    ) -> CompletionOutcome {
        match self.send(&candidate.model_id, request).await {
            Ok((status, body)) => classify(&candidate.model_id, status, &body),
            Err(e) => {
                warn!("Gemini call failed for {}: {}", candidate.model_id, e);
                e.into()
            }
        }
    }
}

fn build_body(request: &CompletionRequest) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: &request.system_prompt,
            }],
        },
        contents: vec![Content {
            role: Some("user"),
            parts: vec![Part {
                text: &request.user_prompt,
            }],
        }],
        generation_config: GenerationConfig {
            max_output_tokens: request.max_output_tokens,
            temperature: request.temperature,
        },
    }
}

/// Fold a raw HTTP response into a completion outcome.
fn classify(model: &str, status: StatusCode, body: &str) -> CompletionOutcome {
    if !status.is_success() {
        let error = parse_error(model, status, body);
        warn!("Gemini returned {} for {}: {}", status, model, error);
        return error.into();
    }

    match parse_success(body) {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("Gemini response for {} unusable: {}", model, e);
            e.into()
        }
    }
}

fn parse_error(model: &str, status: StatusCode, body: &str) -> ProviderError {
    let api_error = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error);
    let grpc_status = api_error
        .as_ref()
        .and_then(|e| e.status.as_deref())
        .unwrap_or_default();
    let message = api_error
        .as_ref()
        .and_then(|e| e.message.clone())
        .unwrap_or_else(|| truncate_detail(body));

    if status == StatusCode::TOO_MANY_REQUESTS {
        return ProviderError::RateLimited {
            provider: PROVIDER_ID.to_string(),
        };
    }
    if grpc_status == "RESOURCE_EXHAUSTED" {
        return ProviderError::QuotaExhausted {
            provider: PROVIDER_ID.to_string(),
            message,
        };
    }
    if status == StatusCode::NOT_FOUND || grpc_status == "NOT_FOUND" {
        return ProviderError::ModelNotFound {
            provider: PROVIDER_ID.to_string(),
            model: model.to_string(),
        };
    }
    // Bad keys come back as 400 INVALID_ARGUMENT with an explanatory message.
    if status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
        || grpc_status == "PERMISSION_DENIED"
        || grpc_status == "UNAUTHENTICATED"
        || message.contains("API key not valid")
    {
        return ProviderError::Unauthorized {
            provider: PROVIDER_ID.to_string(),
            message,
        };
    }

    ProviderError::Http {
        provider: PROVIDER_ID.to_string(),
        status: status.as_u16(),
        message,
    }
}

fn parse_success(body: &str) -> Result<CompletionOutcome, ProviderError> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::MalformedResponse {
            provider: PROVIDER_ID.to_string(),
            message: e.to_string(),
        })?;

    let Some(candidate) = response.candidates.first() else {
        let reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .map(|reason| format!("prompt blocked: {}", reason))
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(ProviderError::EmptyResponse {
            provider: PROVIDER_ID.to_string(),
            message: reason,
        });
    };

    let finish_reason = candidate.finish_reason.as_deref().unwrap_or("UNSPECIFIED");
    if finish_reason == "MAX_TOKENS" {
        return Ok(CompletionOutcome::Truncated);
    }

    let text = candidate.answer_text();
    let text = text.trim();
    if text.is_empty() {
        return Err(ProviderError::EmptyResponse {
            provider: PROVIDER_ID.to_string(),
            message: format!("finishReason {}", finish_reason),
        });
    }

    Ok(CompletionOutcome::Success(text.to_string()))
}
