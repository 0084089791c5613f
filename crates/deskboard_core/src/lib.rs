//! Core domain logic for Deskboard: a personal task board with a Kanban
//! engine, a flat todo list, freeform notes and an append-only archive.
//! This crate is the single source of truth for business invariants.

pub mod board;
pub mod db;
pub mod linkify;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use board::{
    BoardEngine, DragTarget, SweepEvent, CARD_CELEBRATE_MS, CLEAR_THRESHOLD,
    SWEEP_ARCHIVE_DELAY_MS, SWEEP_CLEAR_DELAY_MS,
};
pub use linkify::{annotate, Segment};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::comment::{Comment, CommentId};
pub use model::task::{
    group_archived_batches, ArchivedBatch, ArchivedTask, BatchId, Task, TaskId, TaskStatus,
};
pub use model::todo::{TodoId, TodoItem};
pub use service::comment_service::CommentService;
pub use service::kanban_service::KanbanService;
pub use service::notes_service::{NotesService, NOTES_ACK_MS};
pub use service::todo_service::TodoService;
pub use store::{BoardStore, LocalStore, SqliteStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
