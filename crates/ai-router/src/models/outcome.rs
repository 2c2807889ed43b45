use crate::errors::FallbackClass;

/// Normalized result of one provider call.
///
/// Every provider adapter folds its backend's response envelope and error
/// shapes into one of these variants; the fallback executor only ever looks
/// at this type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Complete text, ready to return to the caller.
    Success(String),

    /// The model stopped because it hit the output token limit.
    Truncated,

    /// Rate limit or quota exhaustion reported by the provider.
    QuotaExceeded,

    /// The provider refused the call for a reason that will not change within
    /// this process (unknown model id, rejected credentials).
    Rejected(String),

    /// Anything else: network errors, malformed responses, server errors.
    TransientFailure(String),
}

impl CompletionOutcome {
    /// How the fallback executor reacts to this outcome.
    ///
    /// See [`FallbackClass`] for the table.
    pub fn fallback_class(&self) -> FallbackClass {
        match self {
            Self::Success(_) => FallbackClass::Return,
            Self::QuotaExceeded | Self::Rejected(_) => FallbackClass::ExcludeAndContinue,
            Self::Truncated | Self::TransientFailure(_) => FallbackClass::Continue,
        }
    }

    /// Short label for logs and diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Truncated => "truncated",
            Self::QuotaExceeded => "quota_exceeded",
            Self::Rejected(_) => "rejected",
            Self::TransientFailure(_) => "transient_failure",
        }
    }

    /// The generated text, for [`Success`](Self::Success) only.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success(text) => Some(text),
            _ => None,
        }
    }

    /// Provider detail attached to failure variants.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Rejected(detail) | Self::TransientFailure(detail) => Some(detail),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_returns() {
        let outcome = CompletionOutcome::Success("ok".to_string());
        assert_eq!(outcome.fallback_class(), FallbackClass::Return);
    }

    #[test]
    fn test_quota_and_rejected_exclude_candidate() {
        assert_eq!(
            CompletionOutcome::QuotaExceeded.fallback_class(),
            FallbackClass::ExcludeAndContinue
        );
        assert_eq!(
            CompletionOutcome::Rejected("model not found".to_string()).fallback_class(),
            FallbackClass::ExcludeAndContinue
        );
    }

    #[test]
    fn test_truncated_and_transient_continue_without_exclusion() {
        assert_eq!(
            CompletionOutcome::Truncated.fallback_class(),
            FallbackClass::Continue
        );
        assert_eq!(
            CompletionOutcome::TransientFailure("503".to_string()).fallback_class(),
            FallbackClass::Continue
        );
    }

    #[test]
    fn test_detail_only_on_failures_with_text() {
        assert_eq!(
            CompletionOutcome::TransientFailure("timeout".to_string()).detail(),
            Some("timeout")
        );
        assert_eq!(CompletionOutcome::Truncated.detail(), None);
        assert_eq!(CompletionOutcome::Success("x".to_string()).detail(), None);
    }
}
