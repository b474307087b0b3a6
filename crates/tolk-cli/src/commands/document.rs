use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tolk_application::DocumentMode;
use tolk_core::document::RenderedDocument;
use tolk_core::session::SessionState;
use tolk_core::translation::{Language, LanguagePair};
use tolk_infrastructure::{ConfigStorage, OfficeDocumentCodec, load_upload};

use super::build_usecase;

pub async fn run(
    storage: &ConfigStorage,
    path: &Path,
    direction: Option<(Language, Language)>,
    out_dir: &Path,
) -> Result<()> {
    let usecase = build_usecase(storage)?;
    let upload = load_upload(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let mode = match direction {
        Some((from, to)) => DocumentMode::Multi(LanguagePair::new(from, to)),
        None => DocumentMode::TwoWay,
    };

    let mut session = SessionState::new();
    let document = usecase
        .translate_document(&mut session, &OfficeDocumentCodec::new(), &upload, mode)
        .await?;

    if !document.outcome.is_translated() {
        eprintln!("{}", document.outcome.text());
    }

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;
    for rendered in [&document.pdf, &document.docx] {
        let written = write_rendered(out_dir, rendered)?;
        println!("{}", written.display());
    }
    Ok(())
}

fn write_rendered(out_dir: &Path, rendered: &RenderedDocument) -> Result<PathBuf> {
    let target = out_dir.join(&rendered.file_name);
    fs::write(&target, &rendered.bytes)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tolk_core::document::DocumentKind;

    #[test]
    fn test_write_rendered_uses_download_name() {
        let temp_dir = TempDir::new().unwrap();
        let rendered = RenderedDocument::new(DocumentKind::Pdf, b"%PDF-1.5".to_vec());

        let written = write_rendered(temp_dir.path(), &rendered).unwrap();

        assert_eq!(written, temp_dir.path().join("translated_document.pdf"));
        assert_eq!(fs::read(written).unwrap(), b"%PDF-1.5");
    }
}
