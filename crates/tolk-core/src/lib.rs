//! Domain layer for TOLK.
//!
//! Holds the language model, the prompt builder, session state and the
//! boundary traits (`ChatModel`, `DocumentCodec`) implemented by the outer
//! crates.

pub mod config;
pub mod document;
pub mod error;
pub mod model;
pub mod session;
pub mod translation;

// Re-export common types
pub use error::{Result, TolkError};
pub use model::{ChatModel, ChatRequest};
