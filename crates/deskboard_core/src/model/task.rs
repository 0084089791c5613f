//! Task and archive domain model.
//!
//! # Responsibility
//! - Define the canonical task record shared by board and storage layers.
//! - Define the immutable archived-task record and its derived batch view.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `status` is always exactly one of the three column values; the three
//!   status partitions are disjoint and exhaustive over any task sequence.
//! - Archived records are never mutated after creation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task on the board.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Identifier shared by every archived task swept out in one pass.
pub type BatchId = Uuid;

/// Column membership for a board task.
///
/// The board has exactly three fixed columns; a column is a filter over the
/// single task sequence, not a separate collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started.
    Todo,
    /// Work is underway.
    InProgress,
    /// Done; eligible for the threshold sweep.
    Complete,
}

impl TaskStatus {
    /// All column values in board display order.
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Complete,
    ];

    /// Stable wire/storage name for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Complete => "complete",
        }
    }

    /// Parses a stored status name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "todo" => Some(Self::Todo),
            "in-progress" => Some(Self::InProgress),
            "complete" => Some(Self::Complete),
            _ => None,
        }
    }
}

/// Canonical board task.
///
/// Ordering among same-status tasks is the task's position in the engine's
/// sequence; there is no stored order field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable global ID used for drag targeting, diffing and archiving.
    pub id: TaskId,
    /// Card title, already trimmed at creation.
    pub title: String,
    /// Current column membership.
    pub status: TaskStatus,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

impl Task {
    /// Creates a task with a generated stable ID.
    pub fn new(title: impl Into<String>, status: TaskStatus, created_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            status,
            created_at,
        }
    }
}

/// Immutable historical record produced by an archive sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedTask {
    /// The original task id.
    pub id: TaskId,
    pub title: String,
    /// `created_at` of the task when it was live.
    pub original_created_at: i64,
    /// Sweep time, shared by every member of the batch.
    pub archived_at: i64,
    /// Groups the records swept out together.
    pub batch_id: BatchId,
}

impl ArchivedTask {
    /// Builds the archive record for one swept task.
    pub fn from_task(task: &Task, batch_id: BatchId, archived_at: i64) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            original_created_at: task.created_at,
            archived_at,
            batch_id,
        }
    }
}

/// Derived grouping of archived tasks sharing one `batch_id`.
///
/// Not stored; recomputed from the flat archived-task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedBatch {
    pub batch_id: BatchId,
    /// Shared sweep time of every member.
    pub archived_at: i64,
    /// Members in archive-insertion order.
    pub tasks: Vec<ArchivedTask>,
}

/// Groups a flat archived-task list into batches, newest batch first.
///
/// # Contract
/// - Input is expected in storage order (newest `archived_at` first, members
///   of a batch contiguous in insertion order), as returned by the store.
/// - Members keep their relative order inside each batch.
pub fn group_archived_batches(records: &[ArchivedTask]) -> Vec<ArchivedBatch> {
    let mut batches: Vec<ArchivedBatch> = Vec::new();

    for record in records {
        match batches.iter_mut().find(|b| b.batch_id == record.batch_id) {
            Some(batch) => batch.tasks.push(record.clone()),
            None => batches.push(ArchivedBatch {
                batch_id: record.batch_id,
                archived_at: record.archived_at,
                tasks: vec![record.clone()],
            }),
        }
    }

    batches.sort_by(|a, b| b.archived_at.cmp(&a.archived_at));
    batches
}
