//! Kanban board engine.
//!
//! # Responsibility
//! - Own the ordered task sequence and all mutations applied to it.
//! - Run the drag-session state machine with live status preview.
//! - Trigger the completion-threshold archive sweep after every accepted
//!   mutation.
//!
//! # Invariants
//! - A column is a filter over the single task sequence; there is no
//!   per-column collection.
//! - `move_task` is the only path that changes a task's status.
//! - Same-status reorder is a pure permutation: it never changes the id
//!   multiset or any task's status.
//! - Cross-status reorder requests are rejected as no-ops.

use crate::model::task::{Task, TaskId, TaskStatus};

pub mod sweep;

pub use sweep::{SweepEvent, CLEAR_THRESHOLD, SWEEP_ARCHIVE_DELAY_MS, SWEEP_CLEAR_DELAY_MS};

use sweep::SweepState;

/// How long a per-card celebration cue stays armed, in milliseconds.
pub const CARD_CELEBRATE_MS: i64 = 600;

/// What the pointer is over during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// One of the three column drop zones.
    Column(TaskStatus),
    /// Another task card.
    Card(TaskId),
}

/// Drag-session state machine: `Idle -> Dragging -> Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragSession {
    Idle,
    Dragging {
        task_id: TaskId,
        /// Status of the dragged task when the drag began.
        start_status: TaskStatus,
    },
}

/// The board engine: task sequence, drag session, sweep state and the
/// transient per-card celebration cue.
#[derive(Debug)]
pub struct BoardEngine {
    tasks: Vec<Task>,
    drag: DragSession,
    sweep: SweepState,
    celebrate: Option<(TaskId, i64)>,
}

impl Default for BoardEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardEngine {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::with_tasks(Vec::new())
    }

    /// Creates a board seeded with a loaded task sequence.
    ///
    /// The loaded sequence does not run the threshold hook; sweeps only
    /// start in response to a mutation.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            drag: DragSession::Idle,
            sweep: SweepState::Idle,
            celebrate: None,
        }
    }

    /// The full task sequence in fine-grained card order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks belonging to one column, in sequence order.
    pub fn tasks_by_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    /// Whether an archive sweep is animating cards out.
    pub fn is_clearing(&self) -> bool {
        self.sweep.is_clearing()
    }

    /// Task currently showing its per-card celebration, if the cue has not
    /// expired yet.
    pub fn celebrating_task(&self, now_ms: i64) -> Option<TaskId> {
        self.celebrate
            .filter(|(_, until)| now_ms < *until)
            .map(|(id, _)| id)
    }

    /// Id of the task being dragged, when a drag session is active.
    pub fn dragged_task(&self) -> Option<TaskId> {
        match self.drag {
            DragSession::Dragging { task_id, .. } => Some(task_id),
            DragSession::Idle => None,
        }
    }

    /// Appends a new task to the given column.
    ///
    /// Returns `None` without changing state when the title is empty or
    /// whitespace-only. The title is stored trimmed. No dedup.
    pub fn add_task(
        &mut self,
        title: &str,
        status: TaskStatus,
        now_ms: i64,
    ) -> Option<TaskId> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        let task = Task::new(title, status, now_ms);
        let id = task.id;
        self.tasks.push(task);
        self.after_mutation(now_ms);
        Some(id)
    }

    /// Removes the task with the given id; no-op when absent.
    pub fn delete_task(&mut self, id: TaskId, now_ms: i64) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };

        self.tasks.remove(index);
        self.after_mutation(now_ms);
        true
    }

    /// Moves a task to another column without reordering it among the
    /// tasks already there. The only path that changes status.
    pub fn move_task(&mut self, id: TaskId, target: TaskStatus, now_ms: i64) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if task.status == target {
            return false;
        }

        task.status = target;
        self.after_mutation(now_ms);
        true
    }

    /// Relocates `id` to sit immediately before `anchor_id`.
    ///
    /// Remove-then-insert semantics: the task is removed first, then the
    /// insertion index is computed against the shortened sequence.
    /// Rejected as a no-op when the two tasks do not share a status, when
    /// either id is unknown, or when `id == anchor_id`.
    pub fn reorder_task(&mut self, id: TaskId, anchor_id: TaskId, now_ms: i64) -> bool {
        if id == anchor_id {
            return false;
        }

        let (Some(from), Some(anchor)) = (self.position(id), self.position(anchor_id)) else {
            return false;
        };
        if self.tasks[from].status != self.tasks[anchor].status {
            return false;
        }

        let task = self.tasks.remove(from);
        let to = self
            .position(anchor_id)
            .unwrap_or_else(|| self.tasks.len());
        self.tasks.insert(to, task);
        self.after_mutation(now_ms);
        true
    }

    /// Begins a drag session for the task under the pointer.
    ///
    /// Stays `Idle` (returns `false`) when no task matches.
    pub fn drag_start(&mut self, id: TaskId) -> bool {
        let Some(task) = self.tasks.iter().find(|t| t.id == id) else {
            return false;
        };

        self.drag = DragSession::Dragging {
            task_id: id,
            start_status: task.status,
        };
        true
    }

    /// Hover update while dragging: live status preview.
    ///
    /// Hovering a column drop zone or a card in another column reassigns
    /// the dragged task's status immediately; hovering a same-status card
    /// does nothing (ordering resolves on drop). Returns whether a status
    /// change was applied.
    pub fn drag_over(&mut self, target: DragTarget, now_ms: i64) -> bool {
        let DragSession::Dragging { task_id, .. } = self.drag else {
            return false;
        };

        let over_status = match target {
            DragTarget::Column(status) => Some(status),
            DragTarget::Card(over_id) => {
                if over_id == task_id {
                    None
                } else {
                    self.tasks.iter().find(|t| t.id == over_id).map(|t| t.status)
                }
            }
        };

        match over_status {
            Some(status) => self.move_task(task_id, status, now_ms),
            None => false,
        }
    }

    /// Ends the drag session.
    ///
    /// With a drop target: decides the per-card celebration, then resolves
    /// same-status repositioning. Cross-status drops do not reorder; the
    /// status was already applied live during the drag. Without a target
    /// (cancellation) only the session state is cleared; live status
    /// changes are not rolled back.
    ///
    /// Returns the celebrated task id, if any.
    pub fn drag_end(&mut self, target: Option<DragTarget>, now_ms: i64) -> Option<TaskId> {
        let DragSession::Dragging {
            task_id,
            start_status,
        } = self.drag
        else {
            return None;
        };
        self.drag = DragSession::Idle;

        let Some(target) = target else {
            return None;
        };

        let mut celebrated = None;
        let complete_count = self.tasks_by_status(TaskStatus::Complete).len();
        let live_status = self.tasks.iter().find(|t| t.id == task_id).map(|t| t.status);

        // A drop that lands the card in Complete gets its own celebration,
        // unless this completion is about to trigger the big sweep.
        if live_status == Some(TaskStatus::Complete)
            && start_status != TaskStatus::Complete
            && complete_count < CLEAR_THRESHOLD
        {
            self.celebrate = Some((task_id, now_ms + CARD_CELEBRATE_MS));
            celebrated = Some(task_id);
        }

        if let DragTarget::Card(over_id) = target {
            if over_id != task_id {
                self.reorder_task(task_id, over_id, now_ms);
            }
        }

        celebrated
    }

    /// Emits due sweep work and applies sweep removals.
    ///
    /// When the clear deadline has passed, exactly the snapshotted ids are
    /// removed from the sequence and the threshold hook re-runs, so tasks
    /// completed during the clearing window stay on the board and may start
    /// the next sweep.
    pub fn poll_sweep(&mut self, now_ms: i64) -> Vec<SweepEvent> {
        let mut events = Vec::new();
        self.sweep.poll(now_ms, &mut events);

        for event in &events {
            if let SweepEvent::Cleared { removed } = event {
                self.tasks.retain(|t| !removed.contains(&t.id));
                self.after_mutation(now_ms);
            }
        }

        events
    }

    /// Post-mutation hook: threshold check, guarded against re-entry by
    /// the sweep's own clearing flag.
    fn after_mutation(&mut self, now_ms: i64) {
        self.sweep.observe(&self.tasks, now_ms);
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(titles: &[(&str, TaskStatus)]) -> BoardEngine {
        let mut board = BoardEngine::new();
        for (title, status) in titles {
            board.add_task(title, *status, 0).unwrap();
        }
        board
    }

    #[test]
    fn blank_title_is_silently_rejected() {
        let mut board = BoardEngine::new();
        assert_eq!(board.add_task("   ", TaskStatus::Todo, 0), None);
        assert!(board.tasks().is_empty());
    }

    #[test]
    fn add_trims_title_and_fixes_column() {
        let mut board = BoardEngine::new();
        let id = board.add_task("  Buy milk  ", TaskStatus::InProgress, 42).unwrap();
        let task = &board.tasks()[0];
        assert_eq!(task.id, id);
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.created_at, 42);
    }

    #[test]
    fn reorder_is_rejected_across_columns() {
        let mut board = board_with(&[("a", TaskStatus::Todo), ("b", TaskStatus::InProgress)]);
        let a = board.tasks()[0].id;
        let b = board.tasks()[1].id;

        assert!(!board.reorder_task(a, b, 0));
        assert_eq!(board.tasks()[0].id, a);
        assert_eq!(board.tasks()[1].id, b);
    }

    #[test]
    fn reorder_inserts_before_anchor_after_removal() {
        let mut board = board_with(&[
            ("a", TaskStatus::Todo),
            ("b", TaskStatus::Todo),
            ("c", TaskStatus::Todo),
        ]);
        let a = board.tasks()[0].id;
        let c = board.tasks()[2].id;

        assert!(board.reorder_task(a, c, 0));
        let order: Vec<&str> = board.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(order, ["b", "a", "c"]);
        assert!(board.reorder_task(c, a, 0));
        let order: Vec<&str> = board.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(order, ["b", "c", "a"]);
    }

    #[test]
    fn drag_start_with_unknown_id_stays_idle() {
        let mut board = board_with(&[("a", TaskStatus::Todo)]);
        assert!(!board.drag_start(uuid::Uuid::new_v4()));
        assert_eq!(board.dragged_task(), None);
    }
}
