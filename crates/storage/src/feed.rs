//! Helpers for writing feed sections.

use serde_json::{Map, Value};

use crate::errors::StorageError;
use crate::paths::{safe_key, AI_SUMMARIES};
use crate::store::FeedStore;

/// Write one summary to `ai_summaries/{category}`.
pub async fn save_summary(
    store: &dyn FeedStore,
    category: &str,
    text: &str,
) -> Result<(), StorageError> {
    let mut entry = Map::new();
    entry.insert(safe_key(category), Value::String(text.to_string()));
    store.update(AI_SUMMARIES, Value::Object(entry)).await
}

/// Merge `entries` into `path` with keys made database-safe.
pub async fn save_section<I, K>(
    store: &dyn FeedStore,
    path: &str,
    entries: I,
) -> Result<(), StorageError>
where
    I: IntoIterator<Item = (K, Value)>,
    K: AsRef<str>,
{
    let map: Map<String, Value> = entries
        .into_iter()
        .map(|(key, value)| (safe_key(key.as_ref()), value))
        .collect();
    store.update(path, Value::Object(map)).await
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::memory::MemoryStore;
    use crate::paths::STOCK_DATA;

    #[tokio::test]
    async fn test_save_summary() {
        let store = MemoryStore::new();
        save_summary(&store, "macro", "- point").await.unwrap();
        save_summary(&store, "portfolio", "- other").await.unwrap();

        assert_eq!(
            store.get("ai_summaries").unwrap(),
            json!({"macro": "- point", "portfolio": "- other"})
        );
    }

    #[tokio::test]
    async fn test_save_section_sanitizes_keys() {
        let store = MemoryStore::new();
        save_section(
            &store,
            STOCK_DATA,
            [("005930.KS", json!({"price": 71000})), ("NVDA", json!({"price": 120}))],
        )
        .await
        .unwrap();

        let data = store.get(STOCK_DATA).unwrap();
        assert!(data.get("005930_KS").is_some());
        assert!(data.get("NVDA").is_some());
    }
}
