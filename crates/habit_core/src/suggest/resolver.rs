//! Goal-to-suggestions resolution with remote-first, rules-fallback policy.

use super::remote::{parse_remote_suggestions, SuggestionProvider};
use super::rules::{classify_goal, fallback_suggestions};
use super::{SuggestionSet, SuggestionSource};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestError {
    /// Goal is missing or blank.
    InvalidGoal,
}

impl Display for SuggestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidGoal => write!(f, "Missing goal in request body"),
        }
    }
}

impl Error for SuggestError {}

/// Resolves habit suggestions for a goal.
///
/// The provider is injected at construction; `None` always uses the
/// keyword fallback.
#[derive(Clone, Default)]
pub struct SuggestionResolver {
    provider: Option<Arc<dyn SuggestionProvider>>,
}

impl SuggestionResolver {
    pub fn new(provider: Option<Arc<dyn SuggestionProvider>>) -> Self {
        Self { provider }
    }

    /// Resolver that never calls a remote provider.
    pub fn fallback_only() -> Self {
        Self::new(None)
    }

    pub fn has_remote(&self) -> bool {
        self.provider.is_some()
    }

    /// Returns three suggestions for `goal`, tagged with their source.
    ///
    /// # Errors
    /// - `InvalidGoal` when `goal` is blank. Provider failures are not errors.
    pub async fn resolve(&self, goal: &str) -> Result<SuggestionSet, SuggestError> {
        let goal = goal.trim();
        if goal.is_empty() {
            return Err(SuggestError::InvalidGoal);
        }

        if let Some(provider) = &self.provider {
            let started_at = Instant::now();
            match provider.complete(goal).await {
                Ok(text) => {
                    let suggestions = parse_remote_suggestions(&text);
                    if !suggestions.is_empty() {
                        info!(
                            "event=suggest module=suggest status=ok source=remote provider={} count={} duration_ms={}",
                            provider.name(),
                            suggestions.len(),
                            started_at.elapsed().as_millis()
                        );
                        return Ok(SuggestionSet {
                            source: SuggestionSource::Remote,
                            suggestions,
                        });
                    }
                    warn!(
                        "event=suggest module=suggest status=degraded provider={} reason=unparseable_response",
                        provider.name()
                    );
                }
                Err(err) => {
                    warn!(
                        "event=suggest module=suggest status=degraded provider={} duration_ms={} error={}",
                        provider.name(),
                        started_at.elapsed().as_millis(),
                        err
                    );
                }
            }
        }

        info!(
            "event=suggest module=suggest status=ok source=fallback category={}",
            classify_goal(goal).as_str()
        );
        Ok(SuggestionSet {
            source: SuggestionSource::Fallback,
            suggestions: fallback_suggestions(goal),
        })
    }
}

impl std::fmt::Debug for SuggestionResolver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionResolver")
            .field("provider", &self.provider.as_ref().map(|p| p.name()))
            .finish()
    }
}
