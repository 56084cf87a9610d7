//! Habit use-case service.
//!
//! # Responsibility
//! - Provide create/list/complete/delete entry points for outer layers.
//! - Supply `today` from an injected `Clock`.
//! - Serialize read-modify-write cycles within one process.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - At most one repository call runs at a time per service instance.
//!   Writers in other processes sharing the same store are not coordinated.

use crate::model::habit::{Habit, HabitId, HabitValidationError};
use crate::repo::habit_repo::{CompletedHabit, HabitRepository, RepoError};
use crate::service::clock::Clock;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Service error for habit use-cases.
#[derive(Debug)]
pub enum HabitServiceError {
    /// Name is missing or blank.
    InvalidName(HabitValidationError),
    /// Target habit does not exist.
    NotFound(HabitId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for HabitServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(err) => write!(f, "invalid habit name: {err}"),
            Self::NotFound(id) => write!(f, "habit not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for HabitServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidName(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<RepoError> for HabitServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::InvalidName(err),
            other => Self::Repo(other),
        }
    }
}

impl From<HabitValidationError> for HabitServiceError {
    fn from(value: HabitValidationError) -> Self {
        Self::InvalidName(value)
    }
}

pub type ServiceResult<T> = Result<T, HabitServiceError>;

/// Habit service facade over a repository and a clock.
pub struct HabitService<R: HabitRepository, C: Clock> {
    repo: R,
    clock: C,
    write_lock: Mutex<()>,
}

impl<R: HabitRepository, C: Clock> HabitService<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self {
            repo,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    /// Creates a habit from raw user input.
    ///
    /// # Contract
    /// - Trims `name`; blank names are rejected with `InvalidName`.
    /// - Returns the stored record with `streak = 0`.
    pub fn create_habit(&self, name: &str) -> ServiceResult<Habit> {
        let habit = Habit::new(name)?;
        let _guard = self.lock();
        let created = self.repo.create_habit(&habit)?;
        info!(
            "event=habit_create module=service status=ok habit_id={}",
            created.id
        );
        Ok(created)
    }

    /// Lists all habits in storage order.
    pub fn list_habits(&self) -> ServiceResult<Vec<Habit>> {
        let _guard = self.lock();
        Ok(self.repo.list_habits()?)
    }

    /// Marks a habit complete for the clock's current date.
    ///
    /// Repeat calls on the same date return the unchanged record.
    pub fn complete_habit(&self, id: &str) -> ServiceResult<CompletedHabit> {
        let today = self.clock.today();
        let _guard = self.lock();
        let completed = self.repo.complete_habit(id, today)?;
        info!(
            "event=habit_complete module=service status=ok habit_id={} outcome={} streak={} today={}",
            completed.habit.id,
            completed.outcome.as_str(),
            completed.habit.streak,
            today
        );
        Ok(completed)
    }

    /// Deletes a habit and returns the removed record.
    pub fn delete_habit(&self, id: &str) -> ServiceResult<Habit> {
        let _guard = self.lock();
        let removed = self.repo.delete_habit(id)?;
        info!(
            "event=habit_delete module=service status=ok habit_id={}",
            removed.id
        );
        Ok(removed)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guarded value is `()`, so a poisoned lock carries no broken state.
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
