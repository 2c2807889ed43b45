use std::borrow::Cow;
use std::fmt;

/// Provider identifier (e.g., "gemini", "groq").
pub type ProviderId = Cow<'static, str>;

/// Identity of a candidate: the `(provider, model)` pair.
///
/// Two candidates with different ranks but the same provider and model are
/// the same backend as far as quota tracking is concerned.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidateId {
    pub provider: ProviderId,
    pub model: String,
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.provider, self.model)
    }
}

/// One (provider, model) pair eligible to serve a summary request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// Provider family that serves this model.
    pub provider_id: ProviderId,

    /// Model identifier as the provider expects it on the wire.
    pub model_id: String,

    /// 1-based position in the category's fallback chain.
    pub priority_rank: usize,
}

impl Candidate {
    pub fn new(
        provider_id: impl Into<ProviderId>,
        model_id: impl Into<String>,
        priority_rank: usize,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            model_id: model_id.into(),
            priority_rank,
        }
    }

    /// Parse a `"<provider>/<model>"` entry.
    ///
    /// The provider is everything before the first `/`; the model keeps any
    /// further slashes, so `groq/openai/gpt-oss-20b` routes model
    /// `openai/gpt-oss-20b` to provider `groq`.
    ///
    /// Returns `None` when either half is empty.
    pub fn parse(entry: &str, priority_rank: usize) -> Option<Self> {
        let (provider, model) = entry.trim().split_once('/')?;
        let provider = provider.trim();
        let model = model.trim();
        if provider.is_empty() || model.is_empty() {
            return None;
        }
        Some(Self::new(
            provider.to_ascii_lowercase(),
            model.to_string(),
            priority_rank,
        ))
    }

    pub fn id(&self) -> CandidateId {
        CandidateId {
            provider: self.provider_id.clone(),
            model: self.model_id.clone(),
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.provider_id, self.model_id)
    }
}
