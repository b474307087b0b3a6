//! Session domain module.
//!
//! - `model`: Per-user session state and the ChatBot log
//! - `history`: Append-only translation history

mod history;
mod model;

pub use history::{SessionHistory, TranslationRecord};
pub use model::{ChatExchange, SessionState};
