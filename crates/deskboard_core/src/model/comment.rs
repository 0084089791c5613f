//! Per-task comment record.
//!
//! # Invariants
//! - `task_id` is a reference, not ownership: deleting a task does not
//!   cascade through this model (storage policy decides retention).
//! - Threads are ordered by `created_at` ascending.

use crate::model::task::TaskId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a comment.
pub type CommentId = Uuid;

/// One comment in a task's thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub task_id: TaskId,
    /// Comment body, already trimmed at creation.
    pub content: String,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

impl Comment {
    /// Creates a comment with a generated stable ID.
    pub fn new(task_id: TaskId, content: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            task_id,
            content: content.into(),
            created_at,
        }
    }
}
