//! Category -> candidate chain configuration.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::errors::RouterError;
use crate::models::{Candidate, ProviderId};

/// Reference policy embedded at build time.
static REFERENCE_POLICY: Lazy<SelectionPolicy> = Lazy::new(|| {
    let json = include_str!("model_policy.json");
    SelectionPolicy::from_json(json).expect("Failed to parse model_policy.json")
});

const DEFAULT_KEY: &str = "default";

#[derive(Debug, Deserialize)]
struct PolicyFile {
    categories: HashMap<String, Vec<String>>,
    default: Vec<String>,
}

/// Validated mapping from category key to an ordered candidate chain.
///
/// Every chain is non-empty and free of duplicate `(provider, model)`
/// identities. Validation happens once at load time so lookups never fail.
#[derive(Clone, Debug)]
pub struct SelectionPolicy {
    categories: HashMap<String, Vec<Candidate>>,
    default: Vec<Candidate>,
}

impl SelectionPolicy {
    /// Build a policy from raw `provider/model` entries.
    ///
    /// Category keys are matched case-insensitively.
    pub fn new(
        categories: HashMap<String, Vec<String>>,
        default: Vec<String>,
    ) -> Result<Self, RouterError> {
        let default = parse_chain(DEFAULT_KEY, &default)?;
        let mut normalized = HashMap::with_capacity(categories.len());
        for (key, entries) in categories {
            let key = normalize_key(&key);
            if normalized.contains_key(&key) {
                return Err(RouterError::DuplicateCategory(key));
            }
            let chain = parse_chain(&key, &entries)?;
            normalized.insert(key, chain);
        }

        Ok(Self {
            categories: normalized,
            default,
        })
    }

    /// Parse a policy document of the form
    /// `{"categories": {"macro": ["gemini/..."]}, "default": [...]}`.
    pub fn from_json(json: &str) -> Result<Self, RouterError> {
        let file: PolicyFile = serde_json::from_str(json)?;
        Self::new(file.categories, file.default)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RouterError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| RouterError::PolicyRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The reference policy shipped with the crate.
    pub fn reference() -> &'static SelectionPolicy {
        &REFERENCE_POLICY
    }

    /// Chain for `key`, or the default chain when the key is not listed.
    ///
    /// The lookup is case-insensitive and ignores surrounding whitespace.
    pub fn chain(&self, key: &str) -> &[Candidate] {
        self.categories
            .get(&normalize_key(key))
            .map(Vec::as_slice)
            .unwrap_or(self.default.as_slice())
    }

    pub fn default_chain(&self) -> &[Candidate] {
        &self.default
    }

    /// Category keys with an explicit chain, sorted.
    pub fn category_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.categories.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Every provider family referenced anywhere in the policy.
    pub fn provider_ids(&self) -> BTreeSet<ProviderId> {
        self.categories
            .values()
            .chain(std::iter::once(&self.default))
            .flatten()
            .map(|candidate| candidate.provider_id.clone())
            .collect()
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase()
}

fn parse_chain(category: &str, entries: &[String]) -> Result<Vec<Candidate>, RouterError> {
    if entries.is_empty() {
        return Err(RouterError::EmptyCategory(category.to_string()));
    }

    let mut seen = HashSet::with_capacity(entries.len());
    let mut chain = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let candidate =
            Candidate::parse(entry, index + 1).ok_or_else(|| RouterError::InvalidCandidate {
                category: category.to_string(),
                entry: entry.clone(),
            })?;

        if !seen.insert(candidate.id()) {
            return Err(RouterError::DuplicateCandidate {
                category: category.to_string(),
                entry: entry.clone(),
            });
        }

        chain.push(candidate);
    }

    Ok(chain)
}
