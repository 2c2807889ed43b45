//! Feed paths.
//!
//! The feed is a single JSON document; each sync section owns one subtree.

pub const MARKET_INDICES_DOMESTIC: &str = "market_indices/domestic";
pub const MARKET_INDICES_GLOBAL: &str = "market_indices/global";
pub const KEY_INDICATORS: &str = "key_indicators";
pub const STOCK_DATA: &str = "stock_data";
pub const NEWS_FEED: &str = "news_feed";
pub const AI_SUMMARIES: &str = "ai_summaries";
pub const PORTFOLIO_LIST: &str = "portfolio_list";
pub const WATCHLIST_LIST: &str = "watchlist_list";
pub const UPDATED_AT: &str = "updated_at";

/// Normalize a path: no leading or trailing slashes, no empty segments.
///
/// The root is the empty string.
pub fn normalize(path: &str) -> Option<String> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments
        .iter()
        .any(|s| s.contains(['.', '$', '#', '[', ']']))
    {
        return None;
    }
    Some(segments.join("/"))
}

/// Database keys cannot contain `.`, `$`, `#`, `[`, `]` or `/`.
///
/// `005930.KS` becomes `005930_KS`.
pub fn safe_key(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            '.' | '$' | '#' | '[' | ']' | '/' => '_',
            c => c,
        })
        .collect()
}
