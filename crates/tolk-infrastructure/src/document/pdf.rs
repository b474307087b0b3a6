//! PDF text extraction and plain-text PDF generation.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Encoding, Object, ObjectId, Stream, StringFormat, dictionary};
use std::collections::BTreeMap;
use tolk_core::document::DocumentKind;
use tolk_core::{Result, TolkError};

const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;
const MARGIN: i64 = 40;
const FONT_SIZE: i64 = 12;
const LEADING: f32 = 14.4;
const WRAP_WIDTH: usize = 100;

/// Returns the text of every page joined with `\n`, trimmed.
///
/// Text objects and line-advancing operators (`Td`/`TD` with a vertical
/// offset, `T*`, `'`, `"`, `Tm`) start a new line.
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let document = Document::load_mem(bytes).map_err(extraction_error)?;

    let mut pages = Vec::new();
    for page_id in document.get_pages().into_values() {
        pages.push(page_text(&document, page_id)?);
    }

    Ok(pages.join("\n").trim().to_string())
}

fn page_text(document: &Document, page_id: ObjectId) -> Result<String> {
    let encodings: BTreeMap<Vec<u8>, Encoding> = document
        .get_page_fonts(page_id)
        .map_err(extraction_error)?
        .into_iter()
        .map(|(name, font)| font.get_font_encoding(document).map(|encoding| (name, encoding)))
        .collect::<lopdf::Result<_>>()
        .map_err(extraction_error)?;
    let content = document
        .get_and_decode_page_content(page_id)
        .map_err(extraction_error)?;

    let mut text = String::new();
    let mut encoding = None;
    for operation in &content.operations {
        let operands = operation.operands.as_slice();
        match operation.operator.as_str() {
            "Tf" => {
                encoding = operands
                    .first()
                    .and_then(|font| font.as_name().ok())
                    .and_then(|name| encodings.get(name));
            }
            "Td" | "TD" => {
                let vertical = operands.get(1).and_then(|ty| ty.as_float().ok());
                if vertical.is_some_and(|ty| ty != 0.0) {
                    break_line(&mut text);
                }
            }
            "T*" | "Tm" | "BT" | "ET" => break_line(&mut text),
            "Tj" | "TJ" => push_shown_text(&mut text, encoding, operands)?,
            "'" | "\"" => {
                break_line(&mut text);
                if let Some(shown) = operands.last() {
                    push_shown_text(&mut text, encoding, std::slice::from_ref(shown))?;
                }
            }
            _ => {}
        }
    }

    Ok(text.trim_end().to_string())
}

fn break_line(text: &mut String) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}

fn push_shown_text(text: &mut String, encoding: Option<&Encoding>, operands: &[Object]) -> Result<()> {
    let Some(encoding) = encoding else {
        tracing::warn!("Skipping text shown without a decodable font");
        return Ok(());
    };
    for operand in operands {
        match operand {
            Object::String(bytes, _) => {
                text.push_str(&Document::decode_text(encoding, bytes).map_err(extraction_error)?);
            }
            Object::Array(items) => push_shown_text(text, Some(encoding), items)?,
            // Large negative kerning inside TJ is a word gap
            Object::Integer(offset) if *offset < -100 => text.push(' '),
            Object::Real(offset) if *offset < -100.0 => text.push(' '),
            _ => {}
        }
    }
    Ok(())
}

/// Renders `text` onto US Letter pages in 12pt Helvetica.
///
/// Each input line is word-wrapped at 100 characters; blank lines are
/// dropped. A new page starts once the next baseline would fall below the
/// bottom margin.
pub fn render(text: &str) -> Result<Vec<u8>> {
    let lines: Vec<String> = text.split('\n').flat_map(wrap_line).collect();
    let pages = paginate(&lines);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids = Vec::with_capacity(pages.len());
    for page_lines in pages {
        let content = page_content(page_lines);
        let encoded = content.encode().map_err(render_error)?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(PAGE_WIDTH),
            Object::Integer(PAGE_HEIGHT),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).map_err(render_error)?;
    Ok(buffer)
}

/// Splits lines into pages. Always yields at least one (possibly empty) page.
fn paginate(lines: &[String]) -> Vec<&[String]> {
    if lines.is_empty() {
        return vec![lines];
    }
    lines.chunks(lines_per_page()).collect()
}

fn lines_per_page() -> usize {
    // Baselines run from the top margin down while they stay at or above the bottom margin
    let usable = (PAGE_HEIGHT - 2 * MARGIN) as f32;
    (usable / LEADING).floor() as usize + 1
}

fn page_content(lines: &[String]) -> Content {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), Object::Integer(FONT_SIZE)]),
        Operation::new("TL", vec![Object::from(LEADING)]),
        Operation::new(
            "Td",
            vec![Object::Integer(MARGIN), Object::Integer(PAGE_HEIGHT - MARGIN)],
        ),
    ];
    for line in lines {
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(line), StringFormat::Literal)],
        ));
        operations.push(Operation::new("T*", vec![]));
    }
    operations.push(Operation::new("ET", vec![]));
    Content { operations }
}

/// Greedy word wrap. Words longer than the width are split across lines.
fn wrap_line(line: &str) -> Vec<String> {
    let mut wrapped = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in line.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while !word.is_empty() {
            let separator = usize::from(current_len > 0);
            if current_len + separator + word.len() <= WRAP_WIDTH {
                if separator == 1 {
                    current.push(' ');
                }
                current.extend(word.iter());
                current_len += separator + word.len();
                break;
            }

            if current_len > 0 {
                wrapped.push(std::mem::take(&mut current));
                current_len = 0;
                continue;
            }

            let rest = word.split_off(WRAP_WIDTH);
            wrapped.push(word.into_iter().collect());
            word = rest;
        }
    }

    if current_len > 0 {
        wrapped.push(current);
    }
    wrapped
}

/// Encodes text for a standard Type1 font with WinAnsiEncoding.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\t' => b' ',
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

fn extraction_error(err: impl std::fmt::Display) -> TolkError {
    TolkError::extraction(DocumentKind::Pdf, err.to_string())
}

fn render_error(err: impl std::fmt::Display) -> TolkError {
    TolkError::render(DocumentKind::Pdf, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_line_breaks_at_word_boundaries() {
        let line = ["word"; 30].join(" ");
        let wrapped = wrap_line(&line);

        assert_eq!(wrapped.len(), 2);
        assert!(wrapped.iter().all(|l| l.chars().count() <= WRAP_WIDTH));
        assert_eq!(wrapped.join(" "), line);
    }

    #[test]
    fn test_wrap_line_splits_long_words() {
        let word = "x".repeat(250);
        let wrapped = wrap_line(&word);
        assert_eq!(
            wrapped.iter().map(String::len).collect::<Vec<_>>(),
            vec![100, 100, 50]
        );
    }

    #[test]
    fn test_wrap_line_drops_blank_lines() {
        assert!(wrap_line("").is_empty());
        assert!(wrap_line("   \t ").is_empty());
    }

    #[test]
    fn test_lines_per_page_fits_between_margins() {
        assert_eq!(lines_per_page(), 50);
    }

    #[test]
    fn test_encode_win_ansi_replaces_unsupported_characters() {
        assert_eq!(encode_win_ansi("Grüße"), vec![b'G', b'r', 0xFC, 0xDF, b'e']);
        assert_eq!(encode_win_ansi("नमस्ते"), vec![b'?'; 6]);
        assert_eq!(encode_win_ansi("a\tb"), b"a b".to_vec());
    }

    #[test]
    fn test_render_produces_pdf() {
        let bytes = render("Hello world").unwrap();
        assert!(bytes.starts_with(b"%PDF-"));

        let document = Document::load_mem(&bytes).unwrap();
        assert_eq!(document.get_pages().len(), 1);
    }

    #[test]
    fn test_render_empty_text_has_one_page() {
        let bytes = render("").unwrap();
        let document = Document::load_mem(&bytes).unwrap();
        assert_eq!(document.get_pages().len(), 1);
    }

    #[test]
    fn test_render_paginates_long_text() {
        let text = (0..120)
            .map(|i| format!("Line number {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let bytes = render(&text).unwrap();

        let document = Document::load_mem(&bytes).unwrap();
        assert_eq!(document.get_pages().len(), 3);
    }

    #[test]
    fn test_extract_reads_rendered_text() {
        let bytes = render("Hello world").unwrap();
        let text = extract_text(&bytes).unwrap();
        assert!(text.contains("Hello world"), "extracted: {text:?}");
    }

    #[test]
    fn test_extract_keeps_line_breaks() {
        let bytes = render("Grüße aus Köln\nZweite Zeile").unwrap();
        assert_eq!(extract_text(&bytes).unwrap(), "Grüße aus Köln\nZweite Zeile");
    }

    #[test]
    fn test_extract_joins_pages_with_newlines() {
        let text = (0..60)
            .map(|i| format!("Line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let bytes = render(&text).unwrap();
        assert_eq!(extract_text(&bytes).unwrap(), text);
    }

    #[test]
    fn test_extract_rejects_garbage() {
        let err = extract_text(b"%PDF-garbage").unwrap_err();
        assert!(err.is_extraction());
        assert!(err.to_string().contains("PDF"));
    }
}
