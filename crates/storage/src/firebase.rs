//! Firebase Realtime Database store.
//!
//! Uses the REST API: `PATCH {database_url}/{path}.json` merges the body into
//! the node, which is the same semantics as `reference(path).update(...)` in
//! the admin SDKs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::StorageError;
use crate::paths::normalize;
use crate::store::FeedStore;

pub struct FirebaseStore {
    client: Client,
    database_url: String,
    auth_token: Option<String>,
}

impl FirebaseStore {
    /// `database_url` is the database root, e.g.
    /// `https://<project>-default-rtdb.firebaseio.com`. `auth_token` is sent as
    /// the `auth` query parameter (database secret or ID token).
    pub fn new(database_url: impl Into<String>, auth_token: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        let database_url = database_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            database_url,
            auth_token: auth_token.filter(|t| !t.trim().is_empty()),
        }
    }

    /// REST URL for a normalized path.
    pub fn url_for(&self, path: &str) -> Result<String, StorageError> {
        let normalized =
            normalize(path).ok_or_else(|| StorageError::InvalidPath(path.to_string()))?;
        Ok(if normalized.is_empty() {
            format!("{}/.json", self.database_url)
        } else {
            format!("{}/{}.json", self.database_url, normalized)
        })
    }
}

#[async_trait]
impl FeedStore for FirebaseStore {
    async fn update(&self, path: &str, value: Value) -> Result<(), StorageError> {
        if !value.is_object() {
            return Err(StorageError::NotAnObject {
                path: path.to_string(),
            });
        }
        let url = self.url_for(path)?;

        let mut request = self.client.patch(&url).json(&value);
        if let Some(token) = &self.auth_token {
            request = request.query(&[("auth", token)]);
        }

        debug!("Firebase update: {}", path);

        let response = request.send().await.map_err(|source| StorageError::Network {
            path: path.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Firebase update of '{}' failed with HTTP {}", path, status);
            return Err(StorageError::Http {
                path: path.to_string(),
                status: status.as_u16(),
                message: body.chars().take(300).collect(),
            });
        }

        Ok(())
    }
}
