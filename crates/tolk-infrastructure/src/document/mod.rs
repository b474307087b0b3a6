//! DOCX and PDF support for document translation.

mod docx;
mod pdf;

use std::fs;
use std::path::Path;
use tolk_core::document::{DocumentCodec, DocumentKind, DocumentUpload};
use tolk_core::{Result, TolkError};

/// [`DocumentCodec`] backed by `zip`/`quick-xml` for DOCX and `lopdf` for PDF.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfficeDocumentCodec;

impl OfficeDocumentCodec {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentCodec for OfficeDocumentCodec {
    fn extract_text(&self, upload: &DocumentUpload) -> Result<String> {
        tracing::debug!(
            "Extracting text from {} ({}, {} bytes)",
            upload.file_name,
            upload.kind,
            upload.bytes.len()
        );
        match upload.kind {
            DocumentKind::Docx => docx::extract_text(&upload.bytes),
            DocumentKind::Pdf => pdf::extract_text(&upload.bytes),
        }
    }

    fn render_pdf(&self, text: &str) -> Result<Vec<u8>> {
        pdf::render(text)
    }

    fn render_docx(&self, text: &str) -> Result<Vec<u8>> {
        docx::render(text)
    }
}

/// Resolves the document kind of a path from its extension.
pub fn document_kind_for_path(path: &Path) -> Result<DocumentKind> {
    let mime = mime_guess::from_path(path)
        .first_raw()
        .ok_or_else(|| TolkError::UnsupportedDocument(path.display().to_string()))?;
    DocumentKind::from_mime(mime)
}

/// Reads a file from disk into a [`DocumentUpload`].
pub fn load_upload(path: &Path) -> Result<DocumentUpload> {
    let kind = document_kind_for_path(path)?;
    let bytes = fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(DocumentUpload::new(file_name, kind, bytes))
}
