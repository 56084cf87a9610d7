//! Habit suggestions for a free-text goal.
//!
//! # Responsibility
//! - Ask an optional remote text-generation provider for suggestions.
//! - Fall back to a static keyword classifier when the provider is absent
//!   or fails.
//!
//! # Invariants
//! - Resolution never touches the habit store.
//! - Provider failures are logged and never surface to callers.

use serde::{Deserialize, Serialize};

pub mod remote;
pub mod resolver;
pub mod rules;

/// Number of suggestions requested from and accepted by any source.
pub const SUGGESTION_COUNT: usize = 3;

/// One suggested habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    #[serde(default)]
    pub reason: String,
}

impl Suggestion {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Where a suggestion set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionSource {
    Remote,
    Fallback,
}

/// Resolved suggestions tagged with their source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionSet {
    pub source: SuggestionSource,
    pub suggestions: Vec<Suggestion>,
}
