//! Habit domain model.
//!
//! # Responsibility
//! - Define the persisted habit record and its external JSON shape.
//! - Provide validation and the completion helper used by repositories.
//!
//! # Invariants
//! - `id` is stable and never reused for another habit.
//! - `name` is trimmed and never empty.
//! - `streak` is 0 until the first completion.

use crate::model::streak::{next_completion, CompletionOutcome};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque identifier for a habit.
///
/// New ids are UUID v4 text, but persisted ids are treated as plain strings.
pub type HabitId = String;

/// Validation failures for habit records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitValidationError {
    /// Name is empty after trimming.
    EmptyName,
}

impl Display for HabitValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "habit name cannot be empty"),
        }
    }
}

impl Error for HabitValidationError {}

/// Canonical habit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    /// Consecutive calendar days completed, ending at `last_completed`.
    pub streak: u32,
    /// Serialized as `YYYY-MM-DD` or `null`.
    pub last_completed: Option<NaiveDate>,
}

impl Habit {
    /// Creates a never-completed habit with a generated id.
    ///
    /// The name is trimmed before validation.
    pub fn new(name: &str) -> Result<Self, HabitValidationError> {
        Self::with_id(Uuid::new_v4().to_string(), name)
    }

    /// Creates a never-completed habit with a caller-provided id.
    pub fn with_id(id: impl Into<HabitId>, name: &str) -> Result<Self, HabitValidationError> {
        let habit = Self {
            id: id.into(),
            name: name.trim().to_string(),
            streak: 0,
            last_completed: None,
        };
        habit.validate()?;
        Ok(habit)
    }

    /// Checks record invariants.
    pub fn validate(&self) -> Result<(), HabitValidationError> {
        if self.name.trim().is_empty() {
            return Err(HabitValidationError::EmptyName);
        }
        Ok(())
    }

    /// Records a completion on `today` and returns the applied transition.
    ///
    /// `AlreadyCompleted` leaves the record untouched; every other outcome sets
    /// `last_completed = today` and the outcome's streak value.
    pub fn complete_on(&mut self, today: NaiveDate) -> CompletionOutcome {
        let outcome = next_completion(self.last_completed, self.streak, today);
        if let Some(streak) = outcome.streak() {
            self.streak = streak;
            self.last_completed = Some(today);
        }
        outcome
    }
}
