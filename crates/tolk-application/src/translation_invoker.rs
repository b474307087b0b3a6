//! Translation through the chat model.

use async_trait::async_trait;
use std::sync::Arc;
use tolk_core::translation::{
    InstructionStyle, LanguagePair, NO_CONTENT_TO_TRANSLATE, TranslationScenario,
    build_instruction, is_blank,
};
use tolk_core::{ChatModel, ChatRequest, Result};

/// Translates text in a given direction.
#[async_trait]
pub trait TextTranslation: Send + Sync {
    /// Translates `text` from `pair.source` to `pair.target`.
    ///
    /// Blank input yields the "No content to translate." sentinel without a
    /// model call. The whole text is sent in a single request; there is no
    /// chunking.
    async fn translate(
        &self,
        text: &str,
        pair: LanguagePair,
        scenario: TranslationScenario,
    ) -> Result<String>;
}

/// [`TextTranslation`] backed by a [`ChatModel`].
pub struct TranslationInvoker {
    model: Arc<dyn ChatModel>,
    style: InstructionStyle,
}

impl TranslationInvoker {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self::with_style(model, InstructionStyle::default())
    }

    pub fn with_style(model: Arc<dyn ChatModel>, style: InstructionStyle) -> Self {
        Self { model, style }
    }

    pub fn style(&self) -> InstructionStyle {
        self.style
    }
}

#[async_trait]
impl TextTranslation for TranslationInvoker {
    async fn translate(
        &self,
        text: &str,
        pair: LanguagePair,
        scenario: TranslationScenario,
    ) -> Result<String> {
        if is_blank(text) {
            return Ok(NO_CONTENT_TO_TRANSLATE.to_string());
        }

        let instruction = build_instruction(
            scenario,
            pair.source.name(),
            pair.target.name(),
            self.style,
        )?;

        tracing::debug!(
            "[TranslationInvoker] {} {} ({} chars, {} style)",
            scenario,
            pair,
            text.chars().count(),
            self.style
        );

        let reply = self
            .model
            .complete(ChatRequest::from_instruction(instruction, text))
            .await?;
        Ok(reply.trim().to_string())
    }
}
