//! Whole-collection persistence for habits.
//!
//! # Responsibility
//! - Load and save the full ordered habit collection as one unit.
//! - Initialize an empty collection on first use.
//!
//! # Invariants
//! - `write` fully replaces prior contents; there are no partial updates.
//! - No in-memory cache is kept between calls.
//! - Malformed documents fail the whole read; individual records that break
//!   `Habit::validate()` are still returned.

use crate::model::habit::Habit;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_file;

pub use json_file::JsonFileStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Serialize(serde_json::Error),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Serialize(err) => write!(f, "failed to serialize habits: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted habit data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

/// Persistence adapter contract over the full habit collection.
pub trait HabitStore {
    /// Returns every stored habit in insertion order.
    fn read(&self) -> StoreResult<Vec<Habit>>;
    /// Replaces the stored collection with `habits`.
    fn write(&self, habits: &[Habit]) -> StoreResult<()>;
}

impl<S: HabitStore + ?Sized> HabitStore for &S {
    fn read(&self) -> StoreResult<Vec<Habit>> {
        (**self).read()
    }

    fn write(&self, habits: &[Habit]) -> StoreResult<()> {
        (**self).write(habits)
    }
}
