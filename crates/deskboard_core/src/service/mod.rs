//! Use-case services wiring in-memory state to the injected store.
//!
//! # Responsibility
//! - Apply every mutation to in-memory state first (phase 1, unconditional).
//! - Attempt persistence second (phase 2, best-effort): failures are logged
//!   and never retried; in-memory state is never reverted.
//!
//! # Invariants
//! - A failed initial load leaves the collection empty/default instead of
//!   blocking the caller.
//! - Services never bypass the engine/store contracts they wrap.

pub mod comment_service;
pub mod kanban_service;
pub mod notes_service;
pub mod todo_service;
