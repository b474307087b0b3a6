//! Translation domain module.
//!
//! # Module Structure
//!
//! - `language`: Supported languages, detector normalization, language pairs
//! - `scenario`: Translation scenarios and instruction styles
//! - `prompt`: System instruction templates and the prompt builder

mod language;
mod prompt;
mod scenario;

pub use language::{DetectedLanguage, Language, LanguagePair};
pub use prompt::{
    DETECTION_INSTRUCTION, MULTI_LANGUAGE_TEMPLATE, SystemInstruction, TWO_WAY_TEMPLATE,
    build_instruction,
};
pub use scenario::{InstructionStyle, TranslationScenario};

/// Returned instead of a translation when the input is blank.
pub const NO_CONTENT_TO_TRANSLATE: &str = "No content to translate.";

/// Returned instead of a detected language when the input is blank.
pub const NO_CONTENT_TO_DETECT: &str = "No content to detect.";

/// Builds the message shown when the detected language is outside the configured pair.
pub fn unsupported_language_message(detected: &str) -> String {
    format!("Detected language: {detected} - Translation not supported.")
}

/// Returns true when `text` is empty or whitespace only.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
