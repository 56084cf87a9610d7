//! Habit repository contract and store-backed implementation.
//!
//! # Responsibility
//! - Create, list, complete and delete habits over a `HabitStore`.
//!
//! # Invariants
//! - Create validates the new record; existing records are carried through
//!   unchanged even when a foreign writer stored them with a blank name.
//! - Insertion order is preserved; deletion removes exactly one record.
//! - A same-day repeat completion performs no write.
//! - Overlapping cycles from separate callers can lose updates; callers that
//!   share a repository must serialize access (see `HabitService`).

use crate::model::habit::{Habit, HabitId, HabitValidationError};
use crate::model::streak::CompletionOutcome;
use crate::store::{HabitStore, StoreError};
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Validation(HabitValidationError),
    Store(StoreError),
    NotFound(HabitId),
    DuplicateId(HabitId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "habit not found: {id}"),
            Self::DuplicateId(id) => write!(f, "habit id already exists: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::NotFound(_) | Self::DuplicateId(_) => None,
        }
    }
}

impl From<HabitValidationError> for RepoError {
    fn from(value: HabitValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Habit state after a completion request, with the transition applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedHabit {
    pub habit: Habit,
    pub outcome: CompletionOutcome,
}

/// Repository interface for habit collection operations.
pub trait HabitRepository {
    /// Appends a new habit and returns the stored record.
    fn create_habit(&self, habit: &Habit) -> RepoResult<Habit>;
    /// Returns the full collection in storage order.
    fn list_habits(&self) -> RepoResult<Vec<Habit>>;
    /// Applies one completion on `today` to the habit with `id`.
    fn complete_habit(&self, id: &str, today: NaiveDate) -> RepoResult<CompletedHabit>;
    /// Removes the habit with `id` and returns it.
    fn delete_habit(&self, id: &str) -> RepoResult<Habit>;
}

/// Repository backed by any whole-collection `HabitStore`.
pub struct StoreHabitRepository<S: HabitStore> {
    store: S,
}

impl<S: HabitStore> StoreHabitRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: HabitStore> HabitRepository for StoreHabitRepository<S> {
    fn create_habit(&self, habit: &Habit) -> RepoResult<Habit> {
        habit.validate()?;

        let mut habits = self.store.read()?;
        if habits.iter().any(|existing| existing.id == habit.id) {
            return Err(RepoError::DuplicateId(habit.id.clone()));
        }
        habits.push(habit.clone());
        self.store.write(&habits)?;

        Ok(habit.clone())
    }

    fn list_habits(&self) -> RepoResult<Vec<Habit>> {
        Ok(self.store.read()?)
    }

    fn complete_habit(&self, id: &str, today: NaiveDate) -> RepoResult<CompletedHabit> {
        let mut habits = self.store.read()?;
        let habit = habits
            .iter_mut()
            .find(|habit| habit.id == id)
            .ok_or_else(|| RepoError::NotFound(id.to_string()))?;

        let outcome = habit.complete_on(today);
        let habit = habit.clone();
        if outcome.is_change() {
            self.store.write(&habits)?;
        }

        Ok(CompletedHabit { habit, outcome })
    }

    fn delete_habit(&self, id: &str) -> RepoResult<Habit> {
        let mut habits = self.store.read()?;
        let index = habits
            .iter()
            .position(|habit| habit.id == id)
            .ok_or_else(|| RepoError::NotFound(id.to_string()))?;

        let removed = habits.remove(index);
        self.store.write(&habits)?;

        Ok(removed)
    }
}
