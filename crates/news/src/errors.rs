use thiserror::Error;

/// Errors that can occur while searching for news.
#[derive(Error, Debug)]
pub enum NewsError {
    /// No API key configured for the news source.
    #[error("Missing API key for {source_id}")]
    MissingApiKey { source_id: String },

    /// The source rate limited the request or the plan's credits ran out.
    #[error("Rate limited: {source_id}")]
    RateLimited { source_id: String },

    /// The request timed out.
    #[error("Timeout: {source_id}")]
    Timeout { source_id: String },

    /// Non-success HTTP status.
    #[error("HTTP {status} from {source_id}: {message}")]
    Http {
        source_id: String,
        status: u16,
        message: String,
    },

    /// Connection-level failure.
    #[error("Network error from {source_id}: {message}")]
    Network { source_id: String, message: String },

    /// The body did not match the expected schema.
    #[error("Malformed response from {source_id}: {message}")]
    MalformedResponse { source_id: String, message: String },
}

impl NewsError {
    pub(crate) fn from_reqwest(source_id: &str, e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout {
                source_id: source_id.to_string(),
            }
        } else {
            Self::Network {
                source_id: source_id.to_string(),
                message: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = NewsError::MissingApiKey {
            source_id: "tavily".to_string(),
        };
        assert_eq!(error.to_string(), "Missing API key for tavily");

        let error = NewsError::Http {
            source_id: "tavily".to_string(),
            status: 500,
            message: "internal".to_string(),
        };
        assert_eq!(error.to_string(), "HTTP 500 from tavily: internal");
    }
}
