//! Freeform notes use-case service.
//!
//! One mutable text blob plus a transient "saved" acknowledgment pulse
//! for the presentation layer.

use crate::store::BoardStore;
use log::error;

/// How long the saved-acknowledgment pulse stays active, in milliseconds.
pub const NOTES_ACK_MS: i64 = 1500;

/// Notes facade over an injected store.
pub struct NotesService<S: BoardStore> {
    content: String,
    ack_until: Option<i64>,
    store: S,
}

impl<S: BoardStore> NotesService<S> {
    /// Loads the singleton notes content; a failed load starts empty.
    pub fn new(mut store: S) -> Self {
        let content = match store.load_notes() {
            Ok(content) => content,
            Err(err) => {
                error!(
                    "event=notes_load module=notes status=error error_code=store_load_failed error={err}"
                );
                String::new()
            }
        };

        Self {
            content,
            ack_until: None,
            store,
        }
    }

    /// The current notes text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replaces the notes text and arms the saved pulse.
    ///
    /// Empty text is a valid value here: the panel can be cleared.
    pub fn set_notes(&mut self, content: impl Into<String>, now_ms: i64) {
        self.content = content.into();
        self.ack_until = Some(now_ms + NOTES_ACK_MS);

        if let Err(err) = self.store.save_notes(&self.content, now_ms) {
            error!(
                "event=notes_save module=notes status=error error_code=store_write_failed error={err}"
            );
        }
    }

    /// Whether the saved pulse is still showing.
    pub fn ack_active(&self, now_ms: i64) -> bool {
        self.ack_until.is_some_and(|until| now_ms < until)
    }
}
