//! Core domain logic for the habit tracker.
//! This crate is the single source of truth for business invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod suggest;

pub use logging::{default_log_level, init_logging, logging_status, LogSink};
pub use model::habit::{Habit, HabitId, HabitValidationError};
pub use model::streak::{next_completion, CompletionOutcome};
pub use repo::habit_repo::{
    CompletedHabit, HabitRepository, RepoError, RepoResult, StoreHabitRepository,
};
pub use service::clock::{Clock, FixedClock, SystemClock};
pub use service::habit_service::{HabitService, HabitServiceError, ServiceResult};
pub use store::{HabitStore, JsonFileStore, StoreError, StoreResult};
pub use suggest::remote::{OpenAiConfig, OpenAiProvider, ProviderError, SuggestionProvider};
pub use suggest::resolver::{SuggestError, SuggestionResolver};
pub use suggest::{Suggestion, SuggestionSet, SuggestionSource};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
