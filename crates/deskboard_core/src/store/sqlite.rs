//! SQLite-backed board store.
//!
//! # Responsibility
//! - Implement the [`BoardStore`] contract over a migrated connection.
//! - Keep SQL details inside the store boundary.
//!
//! # Invariants
//! - `try_new` refuses connections whose schema has not been migrated.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Task/todo saves only touch rows whose identity or diffed fields
//!   actually changed since the last known state.

use crate::db::migrations::{current_user_version, latest_version};
use crate::model::comment::Comment;
use crate::model::task::{ArchivedTask, BatchId, Task, TaskId, TaskStatus};
use crate::model::todo::TodoItem;
use crate::store::{BoardStore, StoreError, StoreResult, ARCHIVE_LOAD_LIMIT};
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

/// Fixed row id of the singleton notes record.
const NOTES_SINGLETON_ID: &str = "00000000-0000-0000-0000-000000000001";

const REQUIRED_TABLES: &[&str] = &["tasks", "todos", "notes", "archived_tasks", "comments"];

/// SQLite implementation of the board store.
///
/// Borrows a migrated connection, so several stores (one per service) can
/// share a single database handle on the one logical thread.
pub struct SqliteStore<'conn> {
    conn: &'conn Connection,
    /// Last task sequence this adapter loaded or saved; diff baseline.
    known_tasks: Vec<Task>,
    /// Last todo list this adapter loaded or saved; diff baseline.
    known_todos: Vec<TodoItem>,
}

impl<'conn> SqliteStore<'conn> {
    /// Constructs a store from a migrated/ready connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version does not match.
    /// - `MissingRequiredTable` when an expected table is absent.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version != expected_version {
            return Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        for table in REQUIRED_TABLES {
            let present: bool = conn.query_row(
                "SELECT EXISTS (
                    SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
                );",
                [table],
                |row| row.get(0),
            )?;
            if !present {
                return Err(StoreError::MissingRequiredTable(table));
            }
        }

        Ok(Self {
            conn,
            known_tasks: Vec::new(),
            known_todos: Vec::new(),
        })
    }
}

impl BoardStore for SqliteStore<'_> {
    fn load_tasks(&mut self) -> StoreResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, status, created_at
             FROM tasks
             ORDER BY created_at ASC, id ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        self.known_tasks = tasks.clone();
        Ok(tasks)
    }

    fn save_tasks(&mut self, tasks: &[Task]) -> StoreResult<()> {
        let deleted: Vec<TaskId> = self
            .known_tasks
            .iter()
            .filter(|known| !tasks.iter().any(|t| t.id == known.id))
            .map(|known| known.id)
            .collect();
        let added: Vec<&Task> = tasks
            .iter()
            .filter(|t| !self.known_tasks.iter().any(|known| known.id == t.id))
            .collect();
        let updated: Vec<&Task> = tasks
            .iter()
            .filter(|t| {
                self.known_tasks
                    .iter()
                    .find(|known| known.id == t.id)
                    .is_some_and(|known| known.status != t.status || known.title != t.title)
            })
            .collect();

        if !deleted.is_empty() {
            let placeholders = vec!["?"; deleted.len()].join(", ");
            self.conn.execute(
                &format!("DELETE FROM tasks WHERE id IN ({placeholders});"),
                params_from_iter(deleted.iter().map(|id| id.to_string())),
            )?;
        }

        for task in added {
            self.conn.execute(
                "INSERT INTO tasks (id, title, status, created_at)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    task.id.to_string(),
                    task.title.as_str(),
                    task.status.as_str(),
                    task.created_at,
                ],
            )?;
        }

        for task in updated {
            self.conn.execute(
                "UPDATE tasks SET title = ?1, status = ?2 WHERE id = ?3;",
                params![
                    task.title.as_str(),
                    task.status.as_str(),
                    task.id.to_string(),
                ],
            )?;
        }

        self.known_tasks = tasks.to_vec();
        Ok(())
    }

    fn load_todos(&mut self) -> StoreResult<Vec<TodoItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, text, completed
             FROM todos
             ORDER BY created_at ASC, id ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut todos = Vec::new();
        while let Some(row) = rows.next()? {
            todos.push(parse_todo_row(row)?);
        }

        self.known_todos = todos.clone();
        Ok(todos)
    }

    fn save_todos(&mut self, todos: &[TodoItem]) -> StoreResult<()> {
        let deleted: Vec<Uuid> = self
            .known_todos
            .iter()
            .filter(|known| !todos.iter().any(|t| t.id == known.id))
            .map(|known| known.id)
            .collect();
        let added: Vec<&TodoItem> = todos
            .iter()
            .filter(|t| !self.known_todos.iter().any(|known| known.id == t.id))
            .collect();
        let updated: Vec<&TodoItem> = todos
            .iter()
            .filter(|t| {
                self.known_todos
                    .iter()
                    .find(|known| known.id == t.id)
                    .is_some_and(|known| known.completed != t.completed)
            })
            .collect();

        if !deleted.is_empty() {
            let placeholders = vec!["?"; deleted.len()].join(", ");
            self.conn.execute(
                &format!("DELETE FROM todos WHERE id IN ({placeholders});"),
                params_from_iter(deleted.iter().map(|id| id.to_string())),
            )?;
        }

        for todo in added {
            self.conn.execute(
                "INSERT INTO todos (id, text, completed, created_at)
                 VALUES (?1, ?2, ?3, (strftime('%s', 'now') * 1000));",
                params![
                    todo.id.to_string(),
                    todo.text.as_str(),
                    bool_to_int(todo.completed),
                ],
            )?;
        }

        for todo in updated {
            self.conn.execute(
                "UPDATE todos SET completed = ?1 WHERE id = ?2;",
                params![bool_to_int(todo.completed), todo.id.to_string()],
            )?;
        }

        self.known_todos = todos.to_vec();
        Ok(())
    }

    fn load_notes(&mut self) -> StoreResult<String> {
        let mut stmt = self
            .conn
            .prepare("SELECT content FROM notes WHERE id = ?1;")?;
        let mut rows = stmt.query([NOTES_SINGLETON_ID])?;

        if let Some(row) = rows.next()? {
            return Ok(row.get("content")?);
        }

        Ok(String::new())
    }

    fn save_notes(&mut self, content: &str, now_ms: i64) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE notes SET content = ?2, updated_at = ?3 WHERE id = ?1;",
            params![NOTES_SINGLETON_ID, content, now_ms],
        )?;

        if changed == 0 {
            self.conn.execute(
                "INSERT INTO notes (id, content, updated_at) VALUES (?1, ?2, ?3);",
                params![NOTES_SINGLETON_ID, content, now_ms],
            )?;
        }

        Ok(())
    }

    fn load_archived_tasks(&mut self) -> StoreResult<Vec<ArchivedTask>> {
        // rowid preserves per-batch insertion order; batches share one
        // archived_at so the secondary key never reorders inside a batch.
        let mut stmt = self.conn.prepare(
            "SELECT id, title, original_created_at, archived_at, batch_id
             FROM archived_tasks
             ORDER BY archived_at DESC, rowid ASC
             LIMIT ?1;",
        )?;

        let mut rows = stmt.query([ARCHIVE_LOAD_LIMIT])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_archived_row(row)?);
        }

        Ok(records)
    }

    fn archive_batch(
        &mut self,
        tasks: &[Task],
        batch_id: BatchId,
        archived_at: i64,
    ) -> StoreResult<()> {
        let tx = self.conn.unchecked_transaction()?;

        for task in tasks {
            tx.execute(
                "INSERT INTO archived_tasks (id, title, original_created_at, archived_at, batch_id)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    task.id.to_string(),
                    task.title.as_str(),
                    task.created_at,
                    archived_at,
                    batch_id.to_string(),
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    fn load_comments(&mut self, task_id: TaskId) -> StoreResult<Vec<Comment>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, task_id, content, created_at
             FROM comments
             WHERE task_id = ?1
             ORDER BY created_at ASC, rowid ASC;",
        )?;

        let mut rows = stmt.query([task_id.to_string()])?;
        let mut comments = Vec::new();
        while let Some(row) = rows.next()? {
            comments.push(parse_comment_row(row)?);
        }

        Ok(comments)
    }

    fn add_comment(&mut self, comment: &Comment) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO comments (id, task_id, content, created_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                comment.id.to_string(),
                comment.task_id.to_string(),
                comment.content.as_str(),
                comment.created_at,
            ],
        )?;

        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> StoreResult<Task> {
    let id = parse_uuid(row, "id", "tasks.id")?;

    let status_text: String = row.get("status")?;
    let status = TaskStatus::parse(&status_text).ok_or_else(|| {
        StoreError::InvalidData(format!("invalid status `{status_text}` in tasks.status"))
    })?;

    Ok(Task {
        id,
        title: row.get("title")?,
        status,
        created_at: row.get("created_at")?,
    })
}

fn parse_todo_row(row: &Row<'_>) -> StoreResult<TodoItem> {
    let id = parse_uuid(row, "id", "todos.id")?;

    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(StoreError::InvalidData(format!(
                "invalid completed value `{other}` in todos.completed"
            )));
        }
    };

    Ok(TodoItem {
        id,
        text: row.get("text")?,
        completed,
    })
}

fn parse_archived_row(row: &Row<'_>) -> StoreResult<ArchivedTask> {
    Ok(ArchivedTask {
        id: parse_uuid(row, "id", "archived_tasks.id")?,
        title: row.get("title")?,
        original_created_at: row.get("original_created_at")?,
        archived_at: row.get("archived_at")?,
        batch_id: parse_uuid(row, "batch_id", "archived_tasks.batch_id")?,
    })
}

fn parse_comment_row(row: &Row<'_>) -> StoreResult<Comment> {
    Ok(Comment {
        id: parse_uuid(row, "id", "comments.id")?,
        task_id: parse_uuid(row, "task_id", "comments.task_id")?,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
    })
}

fn parse_uuid(row: &Row<'_>, column: &str, qualified: &str) -> StoreResult<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text)
        .map_err(|_| StoreError::InvalidData(format!("invalid uuid value `{text}` in {qualified}")))
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
