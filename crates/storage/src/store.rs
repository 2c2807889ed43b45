use async_trait::async_trait;
use serde_json::Value;

use crate::errors::StorageError;

/// Destination for feed sections.
#[async_trait]
pub trait FeedStore: Send + Sync {
    /// Merge the JSON object `value` into the node at `path`.
    ///
    /// Keys present in `value` replace the children with the same name;
    /// other children of `path` are left untouched.
    async fn update(&self, path: &str, value: Value) -> Result<(), StorageError>;
}
