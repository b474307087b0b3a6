//! Error types for the Tolk application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::DocumentKind;

/// A shared error type for the entire Tolk application.
///
/// Empty input and unsupported detected languages are deliberately absent:
/// those are ordinary outcomes of a translation request, not faults.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum TolkError {
    /// Any failure from the LLM endpoint (transport, HTTP status, malformed payload)
    #[error("Model error: {message}")]
    Model {
        status_code: Option<u16>,
        message: String,
    },

    /// Text could not be extracted from an uploaded document
    #[error("Failed to read {kind} document: {message}")]
    Extraction { kind: DocumentKind, message: String },

    /// Translated text could not be rendered into a downloadable document
    #[error("Failed to render {kind} document: {message}")]
    Render { kind: DocumentKind, message: String },

    /// The uploaded file is neither DOCX nor PDF
    #[error("Unsupported file type: {0}")]
    UnsupportedDocument(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TolkError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Model error without an HTTP status
    pub fn model(message: impl Into<String>) -> Self {
        Self::Model {
            status_code: None,
            message: message.into(),
        }
    }

    /// Creates a Model error carrying the HTTP status returned by the endpoint
    pub fn model_status(status_code: u16, message: impl Into<String>) -> Self {
        Self::Model {
            status_code: Some(status_code),
            message: message.into(),
        }
    }

    /// Creates an Extraction error
    pub fn extraction(kind: DocumentKind, message: impl Into<String>) -> Self {
        Self::Extraction {
            kind,
            message: message.into(),
        }
    }

    /// Creates a Render error
    pub fn render(kind: DocumentKind, message: impl Into<String>) -> Self {
        Self::Render {
            kind,
            message: message.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a fault raised by the LLM endpoint
    pub fn is_model(&self) -> bool {
        matches!(self, Self::Model { .. })
    }

    /// Check if this is a document extraction fault
    pub fn is_extraction(&self) -> bool {
        matches!(self, Self::Extraction { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for TolkError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for TolkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for TolkError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for TolkError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<minijinja::Error> for TolkError {
    fn from(err: minijinja::Error) -> Self {
        Self::Internal(format!("template error: {err}"))
    }
}

/// Conversion from anyhow::Error (for collaborators that report through anyhow)
impl From<anyhow::Error> for TolkError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, TolkError>`.
pub type Result<T> = std::result::Result<T, TolkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_display() {
        let err = TolkError::model_status(503, "model is loading");
        assert_eq!(err.to_string(), "Model error: model is loading");
        assert!(err.is_model());
        assert!(!err.is_extraction());
    }

    #[test]
    fn test_extraction_error_mentions_kind() {
        let err = TolkError::extraction(DocumentKind::Pdf, "invalid xref table");
        assert_eq!(
            err.to_string(),
            "Failed to read PDF document: invalid xref table"
        );
        assert!(err.is_extraction());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.docx");
        let err: TolkError = io.into();
        match err {
            TolkError::Io { message } => {
                assert!(message.contains("missing.docx"));
                assert!(message.contains("NotFound"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_toml_error_conversion() {
        let parse_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: TolkError = parse_err.into();
        assert!(matches!(err, TolkError::Serialization { ref format, .. } if format == "TOML"));
    }
}
