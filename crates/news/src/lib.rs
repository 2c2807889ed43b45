//! StockSync News Crate
//!
//! Searches recent news for a topic and formats it as prompt context for the
//! summary router, keeping the article links for display.

pub mod errors;
pub mod models;
pub mod source;
pub mod tavily;
pub mod text;

pub use errors::NewsError;
pub use models::{NewsArticle, NewsDigest};
pub use source::NewsSource;
pub use tavily::{TavilyClient, DEFAULT_MAX_RESULTS};
pub use text::{build_context, strip_html};
