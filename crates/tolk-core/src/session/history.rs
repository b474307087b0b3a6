//! Session-scoped translation history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed translation request.
///
/// Records are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    /// Text as submitted (or as extracted from the uploaded document)
    pub original_text: String,
    /// Translated text, or the sentinel/unsupported message shown instead
    pub translated_text: String,
    /// When the request completed
    pub created_at: DateTime<Utc>,
}

impl TranslationRecord {
    pub fn new(original_text: impl Into<String>, translated_text: impl Into<String>) -> Self {
        Self {
            original_text: original_text.into(),
            translated_text: translated_text.into(),
            created_at: Utc::now(),
        }
    }
}

/// An append-only log of [`TranslationRecord`]s in insertion order.
///
/// The only way to remove entries is [`SessionHistory::clear`]. There is no
/// size cap and nothing is persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionHistory {
    records: Vec<TranslationRecord>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: TranslationRecord) {
        self.records.push(record);
    }

    /// Removes every record regardless of how many there are.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Returns the records in insertion order.
    pub fn list(&self) -> &[TranslationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
