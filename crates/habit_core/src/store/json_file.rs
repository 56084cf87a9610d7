//! JSON document store on the local file system.
//!
//! # Responsibility
//! - Persist the habit collection as one pretty-printed JSON array.
//! - Treat an absent file as an empty collection and create it.
//!
//! # Invariants
//! - Parent directories are created before every write.
//! - Empty or whitespace-only files read as `[]`.
//! - Malformed documents surface as `StoreError::InvalidData`.
//! - Records that parse but fail `Habit::validate()` are kept and logged, so
//!   they stay listable and deletable.

use super::{HabitStore, StoreError, StoreResult};
use crate::model::habit::Habit;
use log::{debug, error, info, warn};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Instant;

/// File-backed habit store. Every call round-trips through the file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_existing(&self) -> StoreResult<Option<Vec<Habit>>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error(err)),
        };

        if raw.trim().is_empty() {
            return Ok(Some(Vec::new()));
        }

        let habits: Vec<Habit> = serde_json::from_str(&raw).map_err(|err| {
            StoreError::InvalidData(format!("`{}` is not a habit array: {err}", self.path.display()))
        })?;
        for habit in &habits {
            if let Err(err) = habit.validate() {
                warn!(
                    "event=store_read module=store status=invalid_record habit_id={} error={}",
                    habit.id, err
                );
            }
        }
        Ok(Some(habits))
    }

    fn write_document(&self, habits: &[Habit]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }
        let body = serde_json::to_string_pretty(habits).map_err(StoreError::Serialize)?;
        std::fs::write(&self.path, body).map_err(|err| self.io_error(err))
    }
}

impl HabitStore for JsonFileStore {
    fn read(&self) -> StoreResult<Vec<Habit>> {
        let started_at = Instant::now();

        match self.read_existing() {
            Ok(Some(habits)) => {
                debug!(
                    "event=store_read module=store status=ok count={} duration_ms={}",
                    habits.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(habits)
            }
            Ok(None) => {
                info!(
                    "event=store_init module=store status=start path={}",
                    self.path.display()
                );
                self.write(&[])?;
                Ok(Vec::new())
            }
            Err(err) => {
                error!(
                    "event=store_read module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn write(&self, habits: &[Habit]) -> StoreResult<()> {
        let started_at = Instant::now();

        let result = self.write_document(habits);
        match &result {
            Ok(()) => debug!(
                "event=store_write module=store status=ok count={} duration_ms={}",
                habits.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=store_write module=store status=error count={} duration_ms={} error={}",
                habits.len(),
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}
