use async_trait::async_trait;

use crate::errors::NewsError;
use crate::models::NewsDigest;

/// A searchable news backend.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Identifier used in logs and errors, e.g. "tavily".
    fn id(&self) -> &'static str;

    /// Recent news for `query`, formatted as prompt context plus links.
    async fn search(&self, query: &str) -> Result<NewsDigest, NewsError>;
}
