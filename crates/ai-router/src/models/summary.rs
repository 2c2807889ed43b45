/// Written when no provider credentials are configured at all.
pub const UNCONFIGURED_MESSAGE: &str =
    "AI 요약 서비스가 설정되지 않아 요약을 생성할 수 없습니다.";

/// Written when there was no news context to summarize.
pub const NO_DATA_MESSAGE: &str = "최근 24시간 내 관련된 중요 뉴스 데이터가 없습니다.";

/// Written when every candidate in the chain failed.
pub const EXHAUSTED_MESSAGE: &str = "AI 서비스 일시 장애로 요약을 생성할 수 없습니다.";

/// Why a summary fell back to a fixed message.
///
/// The three messages are distinct so downstream consumers and logs can tell
/// the outcomes apart by text alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DegradedReason {
    /// No backend credentials were configured.
    Unconfigured,
    /// The request had no payload; no backend was called.
    NoData,
    /// Every candidate was skipped or failed.
    Exhausted,
}

impl DegradedReason {
    pub fn message(self) -> &'static str {
        match self {
            Self::Unconfigured => UNCONFIGURED_MESSAGE,
            Self::NoData => NO_DATA_MESSAGE,
            Self::Exhausted => EXHAUSTED_MESSAGE,
        }
    }
}
