//! Persistence-adapter contract and implementations.
//!
//! # Responsibility
//! - Define the list-shaped storage contract consumed by the services.
//! - Isolate SQLite query details from board/service orchestration.
//!
//! # Invariants
//! - `save_tasks`/`save_todos` diff the full new sequence against the
//!   adapter's last known state and issue only id-keyed inserts, updates
//!   and deletes; saving an unchanged sequence issues nothing.
//! - `archive_batch` is insert-only and atomic per batch.
//! - The local-only implementation never fails: loads return defaults,
//!   saves are accepted no-ops.

use crate::db::DbError;
use crate::model::comment::Comment;
use crate::model::task::{ArchivedTask, BatchId, Task, TaskId};
use crate::model::todo::TodoItem;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod sqlite;

pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer error for adapter read/write operations.
///
/// Services log these and keep operating on in-memory state; nothing here
/// is fatal to the board.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Persisted row cannot be decoded into a domain value.
    InvalidData(String),
    /// Connection has not been migrated to the expected schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Migrated connection is missing a table this store requires.
    MissingRequiredTable(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Maximum archived records returned by `load_archived_tasks`.
pub const ARCHIVE_LOAD_LIMIT: u32 = 50;

/// Storage contract consumed by the services.
///
/// Implementations are injected at construction time; when no backend is
/// configured the caller passes a [`LocalStore`] and the board runs on
/// in-memory state alone.
pub trait BoardStore {
    /// Loads all tasks, ascending by creation time.
    fn load_tasks(&mut self) -> StoreResult<Vec<Task>>;
    /// Persists the full task sequence via id-keyed diffing.
    fn save_tasks(&mut self, tasks: &[Task]) -> StoreResult<()>;

    /// Loads all todo items, ascending by creation time.
    fn load_todos(&mut self) -> StoreResult<Vec<TodoItem>>;
    /// Persists the full todo list via id-keyed diffing.
    fn save_todos(&mut self, todos: &[TodoItem]) -> StoreResult<()>;

    /// Loads the singleton notes content; empty string when absent.
    fn load_notes(&mut self) -> StoreResult<String>;
    /// Replaces the singleton notes content.
    fn save_notes(&mut self, content: &str, now_ms: i64) -> StoreResult<()>;

    /// Loads the most recent archived tasks, newest archived first, batch
    /// members in insertion order. Capped at [`ARCHIVE_LOAD_LIMIT`].
    fn load_archived_tasks(&mut self) -> StoreResult<Vec<ArchivedTask>>;
    /// Appends one archive batch; all members share `batch_id` and
    /// `archived_at`. Atomic: either every record lands or none.
    fn archive_batch(
        &mut self,
        tasks: &[Task],
        batch_id: BatchId,
        archived_at: i64,
    ) -> StoreResult<()>;

    /// Loads one task's comment thread, ascending by creation time.
    fn load_comments(&mut self, task_id: TaskId) -> StoreResult<Vec<Comment>>;
    /// Appends one comment.
    fn add_comment(&mut self, comment: &Comment) -> StoreResult<()>;
}

/// No-backend store used when no persistence is configured.
///
/// Loads return empty/default values and saves are accepted no-ops, so the
/// board degrades to purely in-memory operation without surfacing errors.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }
}

impl BoardStore for LocalStore {
    fn load_tasks(&mut self) -> StoreResult<Vec<Task>> {
        Ok(Vec::new())
    }

    fn save_tasks(&mut self, _tasks: &[Task]) -> StoreResult<()> {
        Ok(())
    }

    fn load_todos(&mut self) -> StoreResult<Vec<TodoItem>> {
        Ok(Vec::new())
    }

    fn save_todos(&mut self, _todos: &[TodoItem]) -> StoreResult<()> {
        Ok(())
    }

    fn load_notes(&mut self) -> StoreResult<String> {
        Ok(String::new())
    }

    fn save_notes(&mut self, _content: &str, _now_ms: i64) -> StoreResult<()> {
        Ok(())
    }

    fn load_archived_tasks(&mut self) -> StoreResult<Vec<ArchivedTask>> {
        Ok(Vec::new())
    }

    fn archive_batch(
        &mut self,
        _tasks: &[Task],
        _batch_id: BatchId,
        _archived_at: i64,
    ) -> StoreResult<()> {
        Ok(())
    }

    fn load_comments(&mut self, _task_id: TaskId) -> StoreResult<Vec<Comment>> {
        Ok(Vec::new())
    }

    fn add_comment(&mut self, _comment: &Comment) -> StoreResult<()> {
        Ok(())
    }
}
