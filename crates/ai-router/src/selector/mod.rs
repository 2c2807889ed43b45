//! Model selection.
//!
//! Maps a [`Category`] to the ordered chain of candidates the fallback
//! executor walks. Selection is pure: no I/O, no failure mode. Categories the
//! policy does not list get the default chain.

mod policy;

pub use policy::SelectionPolicy;

use crate::models::{Candidate, Category};

/// Selects the candidate chain for a category.
#[derive(Clone, Debug)]
pub struct ModelSelector {
    policy: SelectionPolicy,
}

impl ModelSelector {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self { policy }
    }

    /// Ordered candidates for `category`, highest priority first.
    pub fn select(&self, category: &Category) -> Vec<Candidate> {
        self.policy.chain(category.as_str()).to_vec()
    }

    pub fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }
}

impl Default for ModelSelector {
    fn default() -> Self {
        Self::new(SelectionPolicy::reference().clone())
    }
}
