//! Session state domain model.

use serde::{Deserialize, Serialize};

use super::history::{SessionHistory, TranslationRecord};

/// One ChatBot turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatExchange {
    /// What the user typed
    pub user: String,
    /// The translation (or unsupported-language message) shown back
    pub bot: String,
}

/// Everything one interactive user accumulates while using the translator.
///
/// A `SessionState` is owned by the front-end and handed to the use case by
/// mutable reference for the duration of a single action. Nothing in the
/// application layer keeps a reference to it, so independent sessions can
/// live side by side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Unique identifier (UUID format)
    pub id: String,
    /// Text of the most recent translation request
    pub original_text: String,
    /// Result shown for the most recent translation request
    pub translated_text: String,
    /// ChatBot conversation log
    pub messages: Vec<ChatExchange>,
    /// Translation history, cleared on demand
    pub history: SessionHistory,
}

impl SessionState {
    /// Creates an empty session with a fresh UUID.
    pub fn new() -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            original_text: String::new(),
            translated_text: String::new(),
            messages: Vec::new(),
            history: SessionHistory::new(),
        }
    }

    /// Stores the latest request/result pair and appends it to the history.
    pub fn record_translation(
        &mut self,
        original_text: impl Into<String>,
        translated_text: impl Into<String>,
    ) -> &TranslationRecord {
        let record = TranslationRecord::new(original_text, translated_text);
        self.original_text = record.original_text.clone();
        self.translated_text = record.translated_text.clone();
        self.history.append(record);
        // Safe to unwrap because we just appended a record
        self.history.list().last().unwrap()
    }

    pub fn push_message(&mut self, user: impl Into<String>, bot: impl Into<String>) -> &ChatExchange {
        self.messages.push(ChatExchange {
            user: user.into(),
            bot: bot.into(),
        });
        // Safe to unwrap because we just pushed an element
        self.messages.last().unwrap()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
