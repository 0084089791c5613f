//! Completion-threshold archive sweep.
//!
//! # Responsibility
//! - Detect when the complete column reaches the clear threshold.
//! - Drive the delayed archive + clear cycle as explicit deadlines
//!   polled with caller-supplied time.
//!
//! # Invariants
//! - The complete-set is snapshotted once at trigger time; archiving and
//!   removal both use that same snapshot.
//! - At most one sweep is in progress; a running sweep blocks re-triggering.
//! - Every member of a batch shares one `batch_id` and one `archived_at`.

use crate::model::task::{BatchId, Task, TaskId, TaskStatus};
use uuid::Uuid;

/// Completed-task count that triggers an archive sweep.
pub const CLEAR_THRESHOLD: usize = 5;

/// Delay from sweep trigger to the celebration + archive hand-off.
pub const SWEEP_ARCHIVE_DELAY_MS: i64 = 300;

/// Further delay from the archive hand-off to board removal.
pub const SWEEP_CLEAR_DELAY_MS: i64 = 1500;

/// Sweep phase owned by the board engine.
#[derive(Debug, Clone)]
pub(crate) enum SweepState {
    Idle,
    Clearing {
        batch_id: BatchId,
        /// Trigger time; shared `archived_at` of the whole batch.
        archived_at: i64,
        /// Complete-set captured at trigger time.
        snapshot: Vec<Task>,
        archive_due: i64,
        clear_due: i64,
        /// The archive hand-off fires exactly once per sweep.
        archived: bool,
    },
}

/// Due sweep work surfaced to the caller by the engine's sweep poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepEvent {
    /// Hand this batch to the archive store and fire the big celebration.
    Archive {
        batch_id: BatchId,
        archived_at: i64,
        tasks: Vec<Task>,
    },
    /// The snapshotted tasks were removed from the board; clearing ended.
    Cleared { removed: Vec<TaskId> },
}

impl SweepState {
    pub(crate) fn is_clearing(&self) -> bool {
        matches!(self, Self::Clearing { .. })
    }

    /// Post-mutation threshold check. Enters clearing mode when the
    /// complete column has reached the threshold and no sweep is running.
    pub(crate) fn observe(&mut self, tasks: &[Task], now_ms: i64) {
        if self.is_clearing() {
            return;
        }

        let complete: Vec<Task> = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Complete)
            .cloned()
            .collect();
        if complete.len() < CLEAR_THRESHOLD {
            return;
        }

        *self = Self::Clearing {
            batch_id: Uuid::new_v4(),
            archived_at: now_ms,
            snapshot: complete,
            archive_due: now_ms + SWEEP_ARCHIVE_DELAY_MS,
            clear_due: now_ms + SWEEP_ARCHIVE_DELAY_MS + SWEEP_CLEAR_DELAY_MS,
            archived: false,
        };
    }

    /// Emits due sweep work. The caller removes the returned `Cleared` ids
    /// from its task sequence and re-runs the threshold check.
    pub(crate) fn poll(&mut self, now_ms: i64, events: &mut Vec<SweepEvent>) {
        let Self::Clearing {
            batch_id,
            archived_at,
            snapshot,
            archive_due,
            clear_due,
            archived,
        } = self
        else {
            return;
        };

        if !*archived && now_ms >= *archive_due {
            events.push(SweepEvent::Archive {
                batch_id: *batch_id,
                archived_at: *archived_at,
                tasks: snapshot.clone(),
            });
            *archived = true;
        }

        if *archived && now_ms >= *clear_due {
            let removed = snapshot.iter().map(|t| t.id).collect();
            events.push(SweepEvent::Cleared { removed });
            *self = Self::Idle;
        }
    }
}
