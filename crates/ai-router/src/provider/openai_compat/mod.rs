//! OpenAI-compatible completion provider.
//!
//! Speaks the `POST {base}/chat/completions` dialect with a bearer token.
//! Groq is the configured instance; any endpoint following the same envelope
//! can be registered under its own provider id.
//!
//! Classification:
//! - `finish_reason: length` -> truncated
//! - HTTP 429, `rate_limit_exceeded`, `insufficient_quota` -> quota exceeded
//! - HTTP 404, `model_not_found`, `model_decommissioned`, HTTP 401/403 -> rejected
//! - everything else -> transient failure

mod models;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::errors::ProviderError;
use crate::models::{Candidate, CompletionOutcome, CompletionRequest};
use crate::provider::{http_client, truncate_detail, CompletionProvider, DEFAULT_REQUEST_TIMEOUT};

use models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ErrorEnvelope};

/// Groq's OpenAI-compatible API root.
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const GROQ_PROVIDER_ID: &str = "groq";

/// Provider for OpenAI-compatible chat completion endpoints.
pub struct OpenAiCompatibleProvider {
    id: &'static str,
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiCompatibleProvider {
    pub fn new(
        id: &'static str,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            id,
            client: http_client(timeout),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Groq with the default transport timeout.
    pub fn groq(api_key: impl Into<String>) -> Self {
        Self::groq_with_timeout(api_key, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn groq_with_timeout(api_key: impl Into<String>, timeout: Duration) -> Self {
        Self::new(GROQ_PROVIDER_ID, GROQ_BASE_URL, api_key, timeout)
    }

    async fn send(
        &self,
        model: &str,
        request: &CompletionRequest,
    ) -> Result<(StatusCode, String), ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = build_body(model, request);

        debug!("{} request: model={}", self.id, model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(self.id, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::from_reqwest(self.id, e))?;

        Ok((status, text))
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompatibleProvider {
    fn id(&self) -> &'static str {
        self.id
    }

    async fn complete(
        &self,
        candidate: &Candidate,
        request: &CompletionRequest,
    ) -> CompletionOutcome {
        match self.send(&candidate.model_id, request).await {
            Ok((status, body)) => classify(self.id, &candidate.model_id, status, &body),
            Err(e) => {
                warn!("{} call failed for {}: {}", self.id, candidate.model_id, e);
                e.into()
            }
        }
    }
}

fn build_body<'a>(model: &'a str, request: &'a CompletionRequest) -> ChatCompletionRequest<'a> {
    ChatCompletionRequest {
        model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: &request.system_prompt,
            },
            ChatMessage {
                role: "user",
                content: &request.user_prompt,
            },
        ],
        max_tokens: request.max_output_tokens,
        temperature: request.temperature,
    }
}

fn classify(provider: &str, model: &str, status: StatusCode, body: &str) -> CompletionOutcome {
    if !status.is_success() {
        let error = parse_error(provider, model, status, body);
        warn!("{} returned {} for {}: {}", provider, status, model, error);
        return error.into();
    }

    match parse_success(provider, body) {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("{} response for {} unusable: {}", provider, model, e);
            e.into()
        }
    }
}

fn parse_error(provider: &str, model: &str, status: StatusCode, body: &str) -> ProviderError {
    let api_error = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error);
    let code = api_error
        .as_ref()
        .and_then(|e| e.code_str())
        .unwrap_or_default()
        .to_string();
    let error_type = api_error
        .as_ref()
        .and_then(|e| e.error_type.as_deref())
        .unwrap_or_default()
        .to_string();
    let message = api_error
        .and_then(|e| e.message)
        .unwrap_or_else(|| truncate_detail(body));

    match (status, code.as_str()) {
        (_, "insufficient_quota") => ProviderError::QuotaExhausted {
            provider: provider.to_string(),
            message,
        },
        (StatusCode::TOO_MANY_REQUESTS, _) | (_, "rate_limit_exceeded") => {
            ProviderError::RateLimited {
                provider: provider.to_string(),
            }
        }
        (StatusCode::NOT_FOUND, _) | (_, "model_not_found") | (_, "model_decommissioned") => {
            ProviderError::ModelNotFound {
                provider: provider.to_string(),
                model: model.to_string(),
            }
        }
        (StatusCode::UNAUTHORIZED, _) | (StatusCode::FORBIDDEN, _) | (_, "invalid_api_key") => {
            ProviderError::Unauthorized {
                provider: provider.to_string(),
                message,
            }
        }
        _ if error_type == "insufficient_quota" => ProviderError::QuotaExhausted {
            provider: provider.to_string(),
            message,
        },
        _ => ProviderError::Http {
            provider: provider.to_string(),
            status: status.as_u16(),
            message,
        },
    }
}

fn parse_success(provider: &str, body: &str) -> Result<CompletionOutcome, ProviderError> {
    let response: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::MalformedResponse {
            provider: provider.to_string(),
            message: e.to_string(),
        })?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::EmptyResponse {
            provider: provider.to_string(),
            message: "no choices".to_string(),
        })?;

    let finish_reason = choice.finish_reason.as_deref().unwrap_or("unknown");
    if finish_reason == "length" {
        return Ok(CompletionOutcome::Truncated);
    }

    let text = choice
        .message
        .and_then(|message| message.content)
        .unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        return Err(ProviderError::EmptyResponse {
            provider: provider.to_string(),
            message: format!("finish_reason {}", finish_reason),
        });
    }

    Ok(CompletionOutcome::Success(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{build_request, GenerationSettings};

    const MODEL: &str = "llama-3.1-8b-instant";

    fn groq(status: StatusCode, body: &str) -> CompletionOutcome {
        classify(GROQ_PROVIDER_ID, MODEL, status, body)
    }

    #[test]
    fn test_success_returns_message_content() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": " - 호재 \n"}, "finish_reason": "stop"}]
        }"#;
        assert_eq!(
            groq(StatusCode::OK, body),
            CompletionOutcome::Success("- 호재".to_string())
        );
    }

    #[test]
    fn test_length_finish_is_truncated() {
        let body = r#"{
            "choices": [{"message": {"role": "assistant", "content": "1. 핵심"}, "finish_reason": "length"}]
        }"#;
        assert_eq!(groq(StatusCode::OK, body), CompletionOutcome::Truncated);
    }

    #[test]
    fn test_http_429_is_quota_exceeded() {
        let body = r#"{"error": {"message": "Rate limit reached for model", "type": "tokens", "code": "rate_limit_exceeded"}}"#;
        assert_eq!(
            groq(StatusCode::TOO_MANY_REQUESTS, body),
            CompletionOutcome::QuotaExceeded
        );
    }

    #[test]
    fn test_insufficient_quota_is_quota_exceeded() {
        let body = r#"{"error": {"message": "You exceeded your current quota", "type": "insufficient_quota", "code": "insufficient_quota"}}"#;
        assert_eq!(
            groq(StatusCode::FORBIDDEN, body),
            CompletionOutcome::QuotaExceeded
        );
    }

    #[test]
    fn test_unknown_model_is_rejected() {
        let body = r#"{"error": {"message": "The model `llama-9` does not exist", "type": "invalid_request_error", "code": "model_not_found"}}"#;
        assert!(matches!(
            groq(StatusCode::NOT_FOUND, body),
            CompletionOutcome::Rejected(_)
        ));
    }

    #[test]
    fn test_decommissioned_model_is_rejected() {
        let body = r#"{"error": {"message": "decommissioned", "code": "model_decommissioned"}}"#;
        assert!(matches!(
            groq(StatusCode::BAD_REQUEST, body),
            CompletionOutcome::Rejected(_)
        ));
    }

    #[test]
    fn test_bad_key_is_rejected() {
        let body = r#"{"error": {"message": "Invalid API Key", "type": "invalid_request_error", "code": "invalid_api_key"}}"#;
        assert!(matches!(
            groq(StatusCode::UNAUTHORIZED, body),
            CompletionOutcome::Rejected(_)
        ));
    }

    #[test]
    fn test_server_error_is_transient() {
        let body = r#"{"error": {"message": "Service Unavailable", "code": 503}}"#;
        assert_eq!(
            groq(StatusCode::SERVICE_UNAVAILABLE, body),
            CompletionOutcome::TransientFailure(
                "HTTP 503 from groq: Service Unavailable".to_string()
            )
        );
    }

    #[test]
    fn test_missing_choices_is_transient() {
        assert!(matches!(
            groq(StatusCode::OK, r#"{"choices": []}"#),
            CompletionOutcome::TransientFailure(_)
        ));
    }

    #[test]
    fn test_null_content_is_transient() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": null}, "finish_reason": "stop"}]}"#;
        assert!(matches!(
            groq(StatusCode::OK, body),
            CompletionOutcome::TransientFailure(_)
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let request = build_request("Apple", "context", &GenerationSettings::default());
        let value = serde_json::to_value(build_body("openai/gpt-oss-20b", &request)).unwrap();

        assert_eq!(value["model"], "openai/gpt-oss-20b");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["messages"][1]["content"], request.user_prompt);
        assert_eq!(value["max_tokens"], 1000);
    }

    #[test]
    fn test_provider_id_is_configurable() {
        let provider = OpenAiCompatibleProvider::new(
            "local",
            "http://localhost:8080/v1/",
            "key",
            DEFAULT_REQUEST_TIMEOUT,
        );
        assert_eq!(provider.id(), "local");
        assert_eq!(provider.base_url, "http://localhost:8080/v1");
    }
}
