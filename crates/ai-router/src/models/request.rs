/// Output token limit shared by every model in the chain.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1000;

/// Low temperature keeps the briefing close to the source articles.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

const SYSTEM_PROMPT: &str = "당신은 냉철한 팩트 기반의 주식 애널리스트입니다. \
뉴스에 없는 내용은 추측하지 말고, 근거가 부족하면 중립으로 판단하세요.";

/// Generation knobs applied to every candidate.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationSettings {
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// A provider-independent completion request.
///
/// Built once per summary and reused unchanged for every candidate in the
/// fallback chain.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    /// Whether the request carries anything worth sending to a model.
    pub fn has_payload(&self) -> bool {
        !self.user_prompt.trim().is_empty()
    }
}

/// Build the briefing request for `subject` from collected news `context`.
///
/// A blank context produces a request with an empty user prompt; the router
/// answers those with the "no data" message without calling any backend.
pub fn build_request(
    subject: &str,
    context: &str,
    settings: &GenerationSettings,
) -> CompletionRequest {
    let context = context.trim();
    let user_prompt = if context.is_empty() {
        String::new()
    } else {
        format!(
            "[뉴스 데이터]\n{context}\n\n\
[임무]\n위 뉴스들을 분석하여 '{subject}'에 대한 투자자용 브리핑을 작성하세요.\n\n\
[출력 양식]\n\
1. 🔍 **핵심 요약**: 가장 중요한 이슈 3가지를 \"- \"로 시작하는 불렛으로 요약 (한국어).\n\
2. 📊 **시장 반응**: 뉴스가 주가에 미칠 영향(호재/악재/중립)을 한 문장으로.\n",
            subject = subject.trim(),
        )
    };

    CompletionRequest {
        system_prompt: SYSTEM_PROMPT.to_string(),
        user_prompt,
        max_output_tokens: settings.max_output_tokens,
        temperature: settings.temperature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_embeds_subject_and_context() {
        let request = build_request(
            "NVIDIA",
            "[1. Chips rally]\nNVIDIA beat estimates.",
            &GenerationSettings::default(),
        );

        assert!(request.has_payload());
        assert!(request.user_prompt.contains("'NVIDIA'"));
        assert!(request.user_prompt.contains("NVIDIA beat estimates."));
        assert!(request.user_prompt.contains("호재/악재/중립"));
        assert_eq!(request.max_output_tokens, DEFAULT_MAX_OUTPUT_TOKENS);
        assert_eq!(request.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn test_blank_context_has_no_payload() {
        let request = build_request("Tesla", "  \n ", &GenerationSettings::default());
        assert!(!request.has_payload());
        assert!(!request.system_prompt.is_empty());
    }

    #[test]
    fn test_settings_are_carried_through() {
        let settings = GenerationSettings {
            max_output_tokens: 256,
            temperature: 0.7,
        };
        let request = build_request("Apple", "context", &settings);
        assert_eq!(request.max_output_tokens, 256);
        assert_eq!(request.temperature, 0.7);
    }

    #[test]
    fn test_build_request_is_pure() {
        let settings = GenerationSettings::default();
        assert_eq!(
            build_request("Apple", "context", &settings),
            build_request("Apple", "context", &settings)
        );
    }
}
