use serde::{Deserialize, Serialize};

/// Link shown next to a summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub url: String,
    /// Publication date as reported by the source; empty when unknown.
    #[serde(default)]
    pub date: String,
}

/// Search result for one query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsDigest {
    /// Article titles and bodies formatted as prompt context.
    pub context: String,
    pub articles: Vec<NewsArticle>,
}

impl NewsDigest {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.context.trim().is_empty()
    }

    /// Combine digests from several queries into one.
    ///
    /// Contexts are joined with a blank line and articles concatenated; empty
    /// contexts are dropped.
    pub fn merge(digests: impl IntoIterator<Item = NewsDigest>) -> Self {
        let mut contexts = Vec::new();
        let mut articles = Vec::new();
        for digest in digests {
            if !digest.is_empty() {
                contexts.push(digest.context);
            }
            articles.extend(digest.articles);
        }
        Self {
            context: contexts.join("\n\n"),
            articles,
        }
    }
}
