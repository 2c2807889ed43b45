//! User profile: tracked holdings, watchlist and macro interests.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

const DEFAULT_PROFILE: &str = include_str!("default_profile.json");

/// Sectors used to build the macro outlook query.
pub const MAX_SECTORS: usize = 3;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TrackedStock {
    pub name: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub shares: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub portfolio: BTreeMap<String, TrackedStock>,
    #[serde(default)]
    pub watchlist: BTreeMap<String, TrackedStock>,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl Profile {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Invalid profile JSON")
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile {}", path.display()))?;
        Self::from_json(&json)
    }

    /// The profile bundled with the binary.
    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_json(DEFAULT_PROFILE)
    }

    /// Up to [`MAX_SECTORS`] distinct sectors across portfolio and watchlist,
    /// sorted.
    pub fn sectors(&self) -> Vec<String> {
        self.portfolio
            .values()
            .chain(self.watchlist.values())
            .filter_map(|stock| stock.sector.as_deref())
            .map(str::trim)
            .filter(|sector| !sector.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .take(MAX_SECTORS)
            .map(str::to_string)
            .collect()
    }

    /// Search keywords for the macro summary.
    pub fn macro_keywords(&self) -> Vec<String> {
        let mut keywords = Vec::with_capacity(2);
        if self.interests.is_empty() {
            keywords.push("Global Market Trends".to_string());
        } else {
            keywords.push(format!(
                "Global Market Trends & {}",
                self.interests.join(", ")
            ));
        }
        let sectors = self.sectors();
        if !sectors.is_empty() {
            keywords.push(format!("Market Outlook for: {} Industry", sectors.join(", ")));
        }
        keywords
    }

    /// Portfolio symbols followed by watchlist symbols, without duplicates.
    pub fn tracked_symbols(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.portfolio
            .keys()
            .chain(self.watchlist.keys())
            .filter(|symbol| seen.insert(symbol.as_str()))
            .cloned()
            .collect()
    }

    /// Display name for `symbol`, falling back to the symbol itself.
    pub fn name_of<'a>(&'a self, symbol: &'a str) -> &'a str {
        self.portfolio
            .get(symbol)
            .or_else(|| self.watchlist.get(symbol))
            .map(|stock| stock.name.as_str())
            .unwrap_or(symbol)
    }

    pub fn sector_of(&self, symbol: &str) -> Option<&str> {
        self.portfolio
            .get(symbol)
            .or_else(|| self.watchlist.get(symbol))
            .and_then(|stock| stock.sector.as_deref())
    }

    pub fn portfolio_names(&self) -> Vec<String> {
        self.portfolio.values().map(|s| s.name.clone()).collect()
    }

    pub fn watchlist_names(&self) -> Vec<String> {
        self.watchlist.values().map(|s| s.name.clone()).collect()
    }
}
