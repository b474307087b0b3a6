//! Document codec boundary.
//!
//! Uploaded documents are reduced to plain text before translation and the
//! translated text is rendered back into fresh documents. Formatting is not
//! preserved in either direction.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, TolkError};

pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const PDF_MIME: &str = "application/pdf";

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    Docx,
    Pdf,
}

impl DocumentKind {
    /// Resolves a MIME type to a document kind.
    pub fn from_mime(mime: &str) -> Result<Self> {
        match mime.trim() {
            DOCX_MIME => Ok(DocumentKind::Docx),
            PDF_MIME => Ok(DocumentKind::Pdf),
            other => Err(TolkError::UnsupportedDocument(other.to_string())),
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentKind::Docx => DOCX_MIME,
            DocumentKind::Pdf => PDF_MIME,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Docx => "docx",
            DocumentKind::Pdf => "pdf",
        }
    }

    /// File name offered for the translated download.
    pub fn translated_file_name(&self) -> String {
        format!("translated_document.{}", self.extension())
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Docx => f.write_str("DOCX"),
            DocumentKind::Pdf => f.write_str("PDF"),
        }
    }
}

/// A file handed over by the user.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub file_name: String,
    pub kind: DocumentKind,
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    pub fn new(file_name: impl Into<String>, kind: DocumentKind, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            kind,
            bytes,
        }
    }
}

/// A generated document ready to be offered for download.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub file_name: String,
    pub kind: DocumentKind,
    pub bytes: Vec<u8>,
}

impl RenderedDocument {
    pub fn new(kind: DocumentKind, bytes: Vec<u8>) -> Self {
        Self {
            file_name: kind.translated_file_name(),
            kind,
            bytes,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        self.kind.mime_type()
    }
}

/// Converts between document bytes and plain text.
pub trait DocumentCodec: Send + Sync {
    /// Extracts the plain text of an uploaded document.
    ///
    /// # Errors
    ///
    /// Returns `TolkError::Extraction` when the bytes cannot be parsed.
    fn extract_text(&self, upload: &DocumentUpload) -> Result<String>;

    /// Renders plain text into a PDF buffer.
    fn render_pdf(&self, text: &str) -> Result<Vec<u8>>;

    /// Renders plain text into a DOCX buffer.
    fn render_docx(&self, text: &str) -> Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mime() {
        assert_eq!(DocumentKind::from_mime(PDF_MIME).unwrap(), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_mime(DOCX_MIME).unwrap(), DocumentKind::Docx);

        let err = DocumentKind::from_mime("text/plain").unwrap_err();
        assert!(matches!(err, TolkError::UnsupportedDocument(ref mime) if mime == "text/plain"));
    }

    #[test]
    fn test_translated_file_names() {
        assert_eq!(DocumentKind::Pdf.translated_file_name(), "translated_document.pdf");
        assert_eq!(DocumentKind::Docx.translated_file_name(), "translated_document.docx");

        let rendered = RenderedDocument::new(DocumentKind::Docx, vec![1, 2, 3]);
        assert_eq!(rendered.file_name, "translated_document.docx");
        assert_eq!(rendered.mime_type(), DOCX_MIME);
    }
}
