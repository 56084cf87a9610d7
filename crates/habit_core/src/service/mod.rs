//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep HTTP and process layers decoupled from storage details.

pub mod clock;
pub mod habit_service;
