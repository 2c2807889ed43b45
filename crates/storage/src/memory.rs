//! In-process feed store for dry runs and tests.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use log::warn;
use serde_json::{Map, Value};

use crate::errors::StorageError;
use crate::paths::normalize;
use crate::store::FeedStore;

#[derive(Debug)]
pub struct MemoryStore {
    root: Mutex<Value>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            root: Mutex::new(Value::Object(Map::new())),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_root(&self) -> MutexGuard<'_, Value> {
        self.root.lock().unwrap_or_else(|poisoned| {
            warn!("Memory store mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Copy of the whole document.
    pub fn snapshot(&self) -> Value {
        self.lock_root().clone()
    }

    /// Copy of the node at `path`, if present.
    pub fn get(&self, path: &str) -> Option<Value> {
        let path = normalize(path)?;
        let root = self.lock_root();
        if path.is_empty() {
            return Some(root.clone());
        }
        let pointer = format!("/{}", path);
        root.pointer(&pointer).cloned()
    }
}

#[async_trait]
impl FeedStore for MemoryStore {
    async fn update(&self, path: &str, value: Value) -> Result<(), StorageError> {
        let Value::Object(entries) = value else {
            return Err(StorageError::NotAnObject {
                path: path.to_string(),
            });
        };
        let normalized =
            normalize(path).ok_or_else(|| StorageError::InvalidPath(path.to_string()))?;

        let segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();
        merge_at(&mut self.lock_root(), &segments, entries);
        Ok(())
    }
}

/// Walk `segments` from `node`, creating objects as needed, and merge
/// `entries` into the final node. Non-object nodes on the way are replaced.
fn merge_at(node: &mut Value, segments: &[&str], entries: Map<String, Value>) {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    if let Value::Object(map) = node {
        match segments.split_first() {
            Some((head, rest)) => {
                let child = map.entry(head.to_string()).or_insert(Value::Null);
                merge_at(child, rest, entries);
            }
            None => map.extend(entries),
        }
    }
}
