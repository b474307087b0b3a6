//! LLM chat endpoint boundary.
//!
//! Detection and translation both go through [`ChatModel`]; the concrete
//! HTTP client lives in `tolk-interaction`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::translation::SystemInstruction;

/// A single, non-streaming chat request: one system message and one user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub system_instruction: String,
    pub user_text: String,
}

impl ChatRequest {
    pub fn new(system_instruction: impl Into<String>, user_text: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            user_text: user_text.into(),
        }
    }

    pub fn from_instruction(instruction: SystemInstruction, user_text: impl Into<String>) -> Self {
        Self::new(instruction.into_string(), user_text)
    }
}

/// An abstract chat-completion model.
///
/// Implementations return the raw reply text. Every failure (timeout,
/// refused connection, HTTP error, malformed body) is reported as
/// `TolkError::Model`; callers do not retry.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Identifier of the model answering requests (e.g. `llama3`).
    fn model_name(&self) -> &str;

    /// Sends one request and waits for the complete reply.
    async fn complete(&self, request: ChatRequest) -> Result<String>;
}
