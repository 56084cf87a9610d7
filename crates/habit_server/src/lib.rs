//! HTTP boundary for the habit tracker.
//!
//! # Responsibility
//! - Map HTTP requests onto `habit_core` use-cases.
//! - Own process configuration and shared request state.
//!
//! # Invariants
//! - No business rules live here; validation beyond body shape is delegated.

pub mod api;
pub mod config;

use habit_core::{
    Clock, HabitService, JsonFileStore, OpenAiProvider, ProviderError, StoreHabitRepository,
    SuggestionProvider, SuggestionResolver, SystemClock,
};
use std::path::PathBuf;
use std::sync::Arc;

pub use api::{build_router, ApiError};
pub use config::{ConfigError, ServerConfig};

pub type SharedClock = Box<dyn Clock + Send + Sync>;
pub type FileHabitService = HabitService<StoreHabitRepository<JsonFileStore>, SharedClock>;

/// State shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub habits: Arc<FileHabitService>,
    pub suggestions: SuggestionResolver,
}

impl AppState {
    /// Builds state over a JSON file store with the given clock and resolver.
    pub fn new(
        data_file: impl Into<PathBuf>,
        clock: SharedClock,
        suggestions: SuggestionResolver,
    ) -> Self {
        let repo = StoreHabitRepository::new(JsonFileStore::new(data_file));
        Self {
            habits: Arc::new(HabitService::new(repo, clock)),
            suggestions,
        }
    }

    /// Builds production state: system clock, remote provider when configured.
    pub fn from_config(config: &ServerConfig) -> Result<Self, ProviderError> {
        let provider = match &config.openai {
            Some(openai) => {
                let provider: Arc<dyn SuggestionProvider> =
                    Arc::new(OpenAiProvider::new(openai.clone())?);
                Some(provider)
            }
            None => None,
        };

        Ok(Self::new(
            config.data_file.clone(),
            Box::new(SystemClock),
            SuggestionResolver::new(provider),
        ))
    }
}
