//! Per-task comment threads with an explicit lazy cache.
//!
//! # Responsibility
//! - Fetch a task's thread on first access and cache it per task id.
//! - Append comments optimistically through the store.
//!
//! # Invariants
//! - A cached thread is never refreshed implicitly; staleness is resolved
//!   only through `invalidate`/`refetch`.
//! - Threads stay ordered by creation time.

use crate::model::comment::{Comment, CommentId};
use crate::model::task::TaskId;
use crate::store::BoardStore;
use log::error;
use std::collections::HashMap;

/// Comment thread facade over an injected store.
pub struct CommentService<S: BoardStore> {
    cache: HashMap<TaskId, Vec<Comment>>,
    store: S,
}

impl<S: BoardStore> CommentService<S> {
    pub fn new(store: S) -> Self {
        Self {
            cache: HashMap::new(),
            store,
        }
    }

    /// Returns the task's thread, fetching it on first access.
    ///
    /// A failed fetch is logged and caches an empty thread, so the card
    /// still expands.
    pub fn thread(&mut self, task_id: TaskId) -> &[Comment] {
        if !self.cache.contains_key(&task_id) {
            let comments = match self.store.load_comments(task_id) {
                Ok(comments) => comments,
                Err(err) => {
                    error!(
                        "event=comments_load module=comments status=error task_id={task_id} error_code=store_load_failed error={err}"
                    );
                    Vec::new()
                }
            };
            self.cache.insert(task_id, comments);
        }

        self.cache
            .get(&task_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Appends a comment to the task's thread.
    ///
    /// Returns `None` without changing state when the content is empty or
    /// whitespace-only. The content is stored trimmed.
    pub fn add_comment(
        &mut self,
        task_id: TaskId,
        content: &str,
        now_ms: i64,
    ) -> Option<CommentId> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }

        // Load the thread first so the cached order stays append-only.
        self.thread(task_id);

        let comment = Comment::new(task_id, content, now_ms);
        let id = comment.id;

        if let Err(err) = self.store.add_comment(&comment) {
            error!(
                "event=comment_add module=comments status=error task_id={task_id} error_code=store_write_failed error={err}"
            );
        }

        self.cache.entry(task_id).or_default().push(comment);
        Some(id)
    }

    /// Drops the cached thread; the next access fetches again.
    pub fn invalidate(&mut self, task_id: TaskId) {
        self.cache.remove(&task_id);
    }

    /// Invalidates and immediately refetches one thread.
    pub fn refetch(&mut self, task_id: TaskId) -> &[Comment] {
        self.invalidate(task_id);
        self.thread(task_id)
    }

    /// Whether a thread has already been fetched (test/diagnostic hook).
    pub fn is_cached(&self, task_id: TaskId) -> bool {
        self.cache.contains_key(&task_id)
    }
}
