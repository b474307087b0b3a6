//! Language detection through the chat model.

use async_trait::async_trait;
use std::sync::Arc;
use tolk_core::translation::{DETECTION_INSTRUCTION, DetectedLanguage, NO_CONTENT_TO_DETECT, is_blank};
use tolk_core::{ChatModel, ChatRequest, Result};

/// Outcome of a detection request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// The input was empty or whitespace only; the model was not called.
    NoContent,
    /// The normalized model reply.
    Detected(DetectedLanguage),
}

impl Detection {
    /// User-facing label: the detected language name, the raw reply, or the
    /// "No content to detect." sentinel.
    pub fn label(&self) -> String {
        match self {
            Detection::NoContent => NO_CONTENT_TO_DETECT.to_string(),
            Detection::Detected(detected) => detected.to_string(),
        }
    }

    pub fn detected(&self) -> Option<&DetectedLanguage> {
        match self {
            Detection::NoContent => None,
            Detection::Detected(detected) => Some(detected),
        }
    }
}

/// Identifies the language of a text.
#[async_trait]
pub trait LanguageDetection: Send + Sync {
    /// Detects the language of `text`.
    ///
    /// # Errors
    ///
    /// Model faults propagate unchanged; there is no retry.
    async fn detect(&self, text: &str) -> Result<Detection>;
}

/// [`LanguageDetection`] backed by a [`ChatModel`] and a fixed instruction.
pub struct LanguageDetector {
    model: Arc<dyn ChatModel>,
}

impl LanguageDetector {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl LanguageDetection for LanguageDetector {
    async fn detect(&self, text: &str) -> Result<Detection> {
        if is_blank(text) {
            tracing::debug!("[LanguageDetector] Blank input, skipping model call");
            return Ok(Detection::NoContent);
        }

        let reply = self
            .model
            .complete(ChatRequest::new(DETECTION_INSTRUCTION, text))
            .await?;
        let detected = DetectedLanguage::from_model_output(reply.trim());

        tracing::debug!(
            "[LanguageDetector] {} replied {:?}, normalized to {:?}",
            self.model.model_name(),
            reply.trim(),
            detected
        );
        Ok(Detection::Detected(detected))
    }
}
