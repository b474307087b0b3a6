//! Application configuration model.
//!
//! Stored as `config.toml`; see `tolk-infrastructure` for loading and saving.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TolkError};
use crate::translation::{InstructionStyle, Language, LanguagePair};

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL_NAME: &str = "llama3";

/// Environment variable overriding [`ModelSettings::base_url`].
pub const ENV_BASE_URL: &str = "TOLK_OLLAMA_URL";
/// Environment variable overriding [`ModelSettings::model_name`].
pub const ENV_MODEL_NAME: &str = "TOLK_MODEL_NAME";

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct TolkConfig {
    #[serde(default)]
    pub model: ModelSettings,
    #[serde(default)]
    pub translation: TranslationSettings,
}

/// Where and how to reach the LLM endpoint.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ModelSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model_name")]
    pub model_name: String,
    /// Unset means requests may block indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model_name: default_model_name(),
            request_timeout_secs: None,
        }
    }
}

/// Behaviour of the translation pages.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TranslationSettings {
    /// First language of the two-language page
    #[serde(default = "default_source")]
    pub source: Language,
    /// Second language of the two-language page
    #[serde(default = "default_target")]
    pub target: Language,
    #[serde(default)]
    pub instruction_style: InstructionStyle,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            source: default_source(),
            target: default_target(),
            instruction_style: InstructionStyle::default(),
        }
    }
}

impl TranslationSettings {
    /// The configured pair of the two-language page.
    pub fn primary_pair(&self) -> LanguagePair {
        LanguagePair::new(self.source, self.target)
    }
}

impl TolkConfig {
    /// Applies environment overrides using the given lookup.
    ///
    /// The lookup is injected so overrides can be tested without touching the
    /// process environment; pass `|key| std::env::var(key).ok()` in production.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.model.base_url = url.trim().to_string();
        }
        if let Some(model) = lookup(ENV_MODEL_NAME).filter(|v| !v.trim().is_empty()) {
            self.model.model_name = model.trim().to_string();
        }
    }

    /// Rejects configurations the translator cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.model.base_url.trim().is_empty() {
            return Err(TolkError::config("model.base_url must not be empty"));
        }
        if self.model.model_name.trim().is_empty() {
            return Err(TolkError::config("model.model_name must not be empty"));
        }
        if self.translation.source == self.translation.target {
            return Err(TolkError::config(format!(
                "translation.source and translation.target must differ (both are {})",
                self.translation.source
            )));
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model_name() -> String {
    DEFAULT_MODEL_NAME.to_string()
}

fn default_source() -> Language {
    Language::German
}

fn default_target() -> Language {
    Language::English
}
