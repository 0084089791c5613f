//! Kanban use-case service.
//!
//! # Responsibility
//! - Wrap the board engine with optimistic persistence.
//! - Perform the sweep's archive hand-off against the store.
//!
//! # Invariants
//! - The in-memory sequence is the source of truth; a failed save is
//!   logged and never rolls the board back.
//! - The archive hand-off passes one shared `batch_id`/`archived_at` per
//!   sweep, exactly once.

use crate::board::{BoardEngine, DragTarget, SweepEvent};
use crate::model::task::{group_archived_batches, ArchivedBatch, TaskId, TaskStatus};
use crate::store::BoardStore;
use log::error;

/// Board facade over an injected store.
pub struct KanbanService<S: BoardStore> {
    board: BoardEngine,
    store: S,
}

impl<S: BoardStore> KanbanService<S> {
    /// Loads the task sequence and builds the engine around it.
    ///
    /// A failed load starts the board empty; the error is logged and the
    /// session continues in-memory.
    pub fn new(mut store: S) -> Self {
        let tasks = match store.load_tasks() {
            Ok(tasks) => tasks,
            Err(err) => {
                error!(
                    "event=tasks_load module=kanban status=error error_code=store_load_failed error={err}"
                );
                Vec::new()
            }
        };

        Self {
            board: BoardEngine::with_tasks(tasks),
            store,
        }
    }

    /// Read access to the underlying engine.
    pub fn board(&self) -> &BoardEngine {
        &self.board
    }

    /// Adds a task and persists the sequence when accepted.
    pub fn add_task(&mut self, title: &str, status: TaskStatus, now_ms: i64) -> Option<TaskId> {
        let id = self.board.add_task(title, status, now_ms);
        if id.is_some() {
            self.persist_tasks();
            self.poll(now_ms);
        }
        id
    }

    /// Deletes a task and persists the sequence when anything changed.
    pub fn delete_task(&mut self, id: TaskId, now_ms: i64) -> bool {
        let changed = self.board.delete_task(id, now_ms);
        if changed {
            self.persist_tasks();
        }
        changed
    }

    /// Moves a task to another column and persists on change.
    pub fn move_task(&mut self, id: TaskId, target: TaskStatus, now_ms: i64) -> bool {
        let changed = self.board.move_task(id, target, now_ms);
        if changed {
            self.persist_tasks();
            self.poll(now_ms);
        }
        changed
    }

    /// Reorders a task within its column and persists on change.
    pub fn reorder_task(&mut self, id: TaskId, anchor_id: TaskId, now_ms: i64) -> bool {
        let changed = self.board.reorder_task(id, anchor_id, now_ms);
        if changed {
            self.persist_tasks();
        }
        changed
    }

    /// Forwards a drag start to the engine.
    pub fn drag_start(&mut self, id: TaskId) -> bool {
        self.board.drag_start(id)
    }

    /// Forwards a hover update; persists when the live preview moved the
    /// dragged task to another column.
    pub fn drag_over(&mut self, target: DragTarget, now_ms: i64) -> bool {
        let changed = self.board.drag_over(target, now_ms);
        if changed {
            self.persist_tasks();
            self.poll(now_ms);
        }
        changed
    }

    /// Forwards a drop (or cancellation) and persists the resolved order.
    ///
    /// Returns the task id to celebrate, if the drop earned one.
    pub fn drag_end(&mut self, target: Option<DragTarget>, now_ms: i64) -> Option<TaskId> {
        let celebrated = self.board.drag_end(target, now_ms);
        if target.is_some() {
            // Reordering changes no diffed field, so an unchanged board
            // makes this save a no-op against the backend.
            self.persist_tasks();
        }
        celebrated
    }

    /// Drives due sweep work: archive hand-off and board removal.
    pub fn poll(&mut self, now_ms: i64) -> Vec<SweepEvent> {
        let events = self.board.poll_sweep(now_ms);

        for event in &events {
            match event {
                SweepEvent::Archive {
                    batch_id,
                    archived_at,
                    tasks,
                } => {
                    if let Err(err) = self.store.archive_batch(tasks, *batch_id, *archived_at) {
                        error!(
                            "event=archive_batch module=kanban status=error batch_id={batch_id} error_code=store_write_failed error={err}"
                        );
                    }
                }
                SweepEvent::Cleared { .. } => self.persist_tasks(),
            }
        }

        events
    }

    /// Archived history grouped into batches, newest batch first.
    pub fn archived_batches(&mut self) -> Vec<ArchivedBatch> {
        match self.store.load_archived_tasks() {
            Ok(records) => group_archived_batches(&records),
            Err(err) => {
                error!(
                    "event=archive_load module=kanban status=error error_code=store_load_failed error={err}"
                );
                Vec::new()
            }
        }
    }

    fn persist_tasks(&mut self) {
        if let Err(err) = self.store.save_tasks(self.board.tasks()) {
            error!(
                "event=tasks_save module=kanban status=error error_code=store_write_failed error={err}"
            );
        }
    }
}
