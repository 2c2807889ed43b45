use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Classification of the content being summarized.
///
/// Selects which candidate ordering applies. Any string parses: names that
/// are not built in become [`Category::Custom`] and route through the
/// policy's default ordering unless the policy lists them explicitly.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Global macro-economic outlook. Reasoning-heavy.
    Macro,
    /// Holdings the user owns.
    Portfolio,
    /// Symbols the user tracks. Latency-sensitive.
    Watchlist,
    /// Any other name. Policy lookups ignore case, so `Custom("Macro")`
    /// selects the same chain as [`Category::Macro`].
    Custom(String),
}

impl Category {
    /// The categories the sync job summarizes on every run.
    pub fn builtin() -> [Category; 3] {
        [Category::Macro, Category::Portfolio, Category::Watchlist]
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Macro => "macro",
            Category::Portfolio => "portfolio",
            Category::Watchlist => "watchlist",
            Category::Custom(name) => name,
        }
    }
}

impl FromStr for Category {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Ok(match key.as_str() {
            "macro" => Category::Macro,
            "portfolio" => Category::Portfolio,
            "watchlist" => Category::Watchlist,
            _ => Category::Custom(key),
        })
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        match value.parse() {
            Ok(category) => category,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
