//! Flat checkable todo item, independent of board tasks.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a todo item.
pub type TodoId = Uuid;

/// One checkable line in the todo panel. No cross-references to `Task`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    /// Item text, already trimmed at creation.
    pub text: String,
    pub completed: bool,
}

impl TodoItem {
    /// Creates an unchecked item with a generated stable ID.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            completed: false,
        }
    }
}
