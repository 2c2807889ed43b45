//! Completion provider abstractions and implementations.
//!
//! This module contains:
//! - The `CompletionProvider` trait every backend adapter implements
//! - Concrete adapters for Google Gemini and OpenAI-compatible endpoints (Groq)
//!
//! # Adapter Boundary
//!
//! Adapters own everything provider-specific: request fields, auth headers,
//! response envelopes, and error sniffing. Whatever happens on the wire, an
//! adapter hands back one [`CompletionOutcome`](crate::CompletionOutcome).
//! Each call is a single attempt; adapters never retry.

mod traits;

pub mod gemini;
pub mod openai_compat;

use std::time::Duration;

use reqwest::Client;

pub use gemini::GeminiProvider;
pub use openai_compat::OpenAiCompatibleProvider;
pub use traits::CompletionProvider;

/// Transport timeout for one completion call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Longest slice of an error body kept in diagnostics.
const MAX_ERROR_DETAIL_CHARS: usize = 300;

fn http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Trim a raw response body for log and diagnostic output.
fn truncate_detail(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_ERROR_DETAIL_CHARS) {
        Some((index, _)) => format!("{}...", &body[..index]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_detail_keeps_short_bodies() {
        assert_eq!(truncate_detail("  boom \n"), "boom");
    }

    #[test]
    fn test_truncate_detail_cuts_on_char_boundary() {
        let body = "한".repeat(MAX_ERROR_DETAIL_CHARS + 10);
        let detail = truncate_detail(&body);
        assert!(detail.ends_with("..."));
        assert_eq!(detail.chars().count(), MAX_ERROR_DETAIL_CHARS + 3);
    }
}
