//! Domain model for tracked habits.
//!
//! # Responsibility
//! - Define the canonical `Habit` record persisted by core.
//! - Own the streak transition rules applied on completion.
//!
//! # Invariants
//! - Every habit is identified by a stable `HabitId` assigned at creation.
//! - Deletion is a hard removal from the collection; there are no tombstones.

pub mod habit;
pub mod streak;
