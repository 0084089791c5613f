//! Domain model for the board, todo list, notes and archive.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep persisted record shapes in one place, independent of any backend.
//!
//! # Invariants
//! - Every domain object is identified by a stable UUID.
//! - A task always carries exactly one of the three column statuses.

pub mod comment;
pub mod task;
pub mod todo;
