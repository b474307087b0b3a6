//! Supported languages and language pairs.
//!
//! Languages are a closed set. Free text coming back from the model is
//! normalized into [`DetectedLanguage`] at the detector boundary, so the rest
//! of the system never compares raw strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::TolkError;

/// A language the translator can be asked to translate from or into.
///
/// Deserialization goes through [`Language::parse`], so config files accept
/// any case as well as ISO codes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[serde(try_from = "String")]
pub enum Language {
    English,
    German,
    French,
    Hindi,
}

impl Language {
    /// Returns the English display name used inside system instructions.
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::German => "German",
            Language::French => "French",
            Language::Hindi => "Hindi",
        }
    }

    /// Returns the ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::German => "de",
            Language::French => "fr",
            Language::Hindi => "hi",
        }
    }

    /// Looks up a language by its ISO 639-1 code (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        Self::iter().find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Parses a user-supplied language, accepting either a name or a code.
    ///
    /// # Examples
    ///
    /// ```
    /// use tolk_core::translation::Language;
    ///
    /// assert_eq!(Language::parse("french").unwrap(), Language::French);
    /// assert_eq!(Language::parse("HI").unwrap(), Language::Hindi);
    /// assert!(Language::parse("klingon").is_err());
    /// ```
    pub fn parse(value: &str) -> Result<Self, TolkError> {
        let trimmed = value.trim();
        Language::from_str(trimmed)
            .ok()
            .or_else(|| Self::from_code(trimmed))
            .ok_or_else(|| {
                TolkError::config(format!(
                    "Unsupported language '{}'. Supported: {}",
                    trimmed,
                    Self::supported_names().join(", ")
                ))
            })
    }

    /// Returns every supported language in display order.
    pub fn all() -> Vec<Language> {
        Self::iter().collect()
    }

    fn supported_names() -> Vec<&'static str> {
        Self::iter().map(|lang| lang.name()).collect()
    }
}

impl TryFrom<String> for Language {
    type Error = TolkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Language::parse(&value)
    }
}

/// The result of normalizing a detector reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectedLanguage {
    /// The reply named one of the supported languages.
    Known(Language),
    /// Anything else; the raw reply is kept for user-facing messages.
    Unknown(String),
}

impl DetectedLanguage {
    /// Normalizes a raw model reply.
    ///
    /// Surrounding whitespace, quotes and punctuation are stripped and the
    /// remainder must equal a language name, ignoring case. Sentences or
    /// partial matches ("The text is German") map to `Unknown`.
    pub fn from_model_output(raw: &str) -> Self {
        let trimmed = raw.trim();
        let candidate =
            trimmed.trim_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace());

        match Language::from_str(candidate) {
            Ok(language) => DetectedLanguage::Known(language),
            Err(_) => DetectedLanguage::Unknown(trimmed.to_string()),
        }
    }

    /// Returns the recognized language, if any.
    pub fn language(&self) -> Option<Language> {
        match self {
            DetectedLanguage::Known(language) => Some(*language),
            DetectedLanguage::Unknown(_) => None,
        }
    }
}

impl fmt::Display for DetectedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectedLanguage::Known(language) => write!(f, "{}", language.name()),
            DetectedLanguage::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}

/// A translation direction.
///
/// `source == target` is representable on purpose: the multi-language flow
/// does not reject it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguagePair {
    pub source: Language,
    pub target: Language,
}

impl LanguagePair {
    pub fn new(source: Language, target: Language) -> Self {
        Self { source, target }
    }

    /// Returns the pair pointing the other way.
    pub fn reversed(&self) -> Self {
        Self {
            source: self.target,
            target: self.source,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.source == self.target
    }
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self::new(Language::German, Language::English)
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source.name(), self.target.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::English.code(), "en");
        assert_eq!(Language::German.code(), "de");
        assert_eq!(Language::French.code(), "fr");
        assert_eq!(Language::Hindi.code(), "hi");
        assert_eq!(Language::from_code("DE"), Some(Language::German));
        assert_eq!(Language::from_code("es"), None);
    }

    #[test]
    fn test_parse_accepts_names_and_codes() {
        assert_eq!(Language::parse(" German ").unwrap(), Language::German);
        assert_eq!(Language::parse("ENGLISH").unwrap(), Language::English);
        assert_eq!(Language::parse("fr").unwrap(), Language::French);

        let err = Language::parse("Spanish").unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("English, German, French, Hindi"));
    }

    #[test]
    fn test_deserialize_ignores_case() {
        let language: Language = serde_json::from_str("\"french\"").unwrap();
        assert_eq!(language, Language::French);
        let language: Language = serde_json::from_str("\"DE\"").unwrap();
        assert_eq!(language, Language::German);
        assert_eq!(serde_json::to_string(&Language::Hindi).unwrap(), "\"Hindi\"");

        let err = serde_json::from_str::<Language>("\"Klingon\"").unwrap_err();
        assert!(err.to_string().contains("Unsupported language"));
    }

    #[test]
    fn test_all_preserves_display_order() {
        assert_eq!(
            Language::all(),
            vec![
                Language::English,
                Language::German,
                Language::French,
                Language::Hindi
            ]
        );
    }

    #[test]
    fn test_detected_language_normalization() {
        assert_eq!(
            DetectedLanguage::from_model_output("German"),
            DetectedLanguage::Known(Language::German)
        );
        assert_eq!(
            DetectedLanguage::from_model_output("  german.\n"),
            DetectedLanguage::Known(Language::German)
        );
        assert_eq!(
            DetectedLanguage::from_model_output("\"English\""),
            DetectedLanguage::Known(Language::English)
        );
    }

    #[test]
    fn test_detected_language_rejects_sentences() {
        let detected = DetectedLanguage::from_model_output("The text is written in German.");
        assert_eq!(
            detected,
            DetectedLanguage::Unknown("The text is written in German.".to_string())
        );
        assert_eq!(detected.language(), None);

        let spanish = DetectedLanguage::from_model_output(" Spanish ");
        assert_eq!(spanish.to_string(), "Spanish");
    }

    #[test]
    fn test_language_pair_reversed() {
        let pair = LanguagePair::default();
        assert_eq!(pair.source, Language::German);
        assert_eq!(pair.target, Language::English);

        let reversed = pair.reversed();
        assert_eq!(reversed, LanguagePair::new(Language::English, Language::German));
        assert_eq!(reversed.to_string(), "English->German");
        assert!(!pair.is_identity());
        assert!(LanguagePair::new(Language::Hindi, Language::Hindi).is_identity());
    }
}
