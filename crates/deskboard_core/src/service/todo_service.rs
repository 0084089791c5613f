//! Todo list use-case service.
//!
//! CRUD over the flat checkable list, with the same optimistic
//! persistence contract as the board: memory first, storage best-effort.

use crate::model::todo::{TodoId, TodoItem};
use crate::store::BoardStore;
use log::error;

/// Todo list facade over an injected store.
pub struct TodoService<S: BoardStore> {
    todos: Vec<TodoItem>,
    store: S,
}

impl<S: BoardStore> TodoService<S> {
    /// Loads the todo list; a failed load starts empty and is logged.
    pub fn new(mut store: S) -> Self {
        let todos = match store.load_todos() {
            Ok(todos) => todos,
            Err(err) => {
                error!(
                    "event=todos_load module=todos status=error error_code=store_load_failed error={err}"
                );
                Vec::new()
            }
        };

        Self { todos, store }
    }

    /// The current list in creation order.
    pub fn todos(&self) -> &[TodoItem] {
        &self.todos
    }

    /// Appends an unchecked item.
    ///
    /// Returns `None` without changing state when the text is empty or
    /// whitespace-only. The text is stored trimmed.
    pub fn add_todo(&mut self, text: &str) -> Option<TodoId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let item = TodoItem::new(text);
        let id = item.id;
        self.todos.push(item);
        self.persist();
        Some(id)
    }

    /// Flips one item's completed flag; no-op when absent.
    pub fn toggle_todo(&mut self, id: TodoId) -> bool {
        let Some(item) = self.todos.iter_mut().find(|t| t.id == id) else {
            return false;
        };

        item.completed = !item.completed;
        self.persist();
        true
    }

    /// Removes one item; no-op when absent.
    pub fn delete_todo(&mut self, id: TodoId) -> bool {
        let before = self.todos.len();
        self.todos.retain(|t| t.id != id);
        if self.todos.len() == before {
            return false;
        }

        self.persist();
        true
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save_todos(&self.todos) {
            error!(
                "event=todos_save module=todos status=error error_code=store_write_failed error={err}"
            );
        }
    }
}
