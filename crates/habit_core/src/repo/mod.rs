//! Repository layer over the whole-collection habit store.
//!
//! # Responsibility
//! - Define use-case oriented collection operations.
//! - Keep persistence details behind `HabitStore`.
//!
//! # Invariants
//! - Every mutating operation is one full read-modify-write cycle.
//! - Repository APIs return semantic errors (`NotFound`) in addition to
//!   storage errors.

pub mod habit_repo;
