//! DOCX (WordprocessingML) text extraction and generation.

use quick_xml::Reader;
use quick_xml::events::Event;
use std::io::{Cursor, Read, Write};
use tolk_core::document::DocumentKind;
use tolk_core::{Result, TolkError};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const DOCUMENT_PART: &str = "word/document.xml";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_HEAD: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;

const DOCUMENT_TAIL: &str = "<w:sectPr/></w:body></w:document>";

/// Returns the text of every paragraph, one per line.
///
/// Line breaks inside a paragraph become `\n` and tabs become `\t`; all other
/// formatting is dropped.
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(extraction_error)?;
    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(extraction_error)?
        .read_to_string(&mut xml)
        .map_err(extraction_error)?;

    paragraphs_from_xml(&xml).map(|paragraphs| paragraphs.join("\n"))
}

/// A paragraph being read, plus any paragraphs nested inside it (text boxes).
#[derive(Default)]
struct OpenParagraph {
    text: String,
    nested: Vec<String>,
}

/// Collects paragraph texts in reading order. A paragraph nested inside
/// another one is emitted right after its enclosing paragraph.
fn paragraphs_from_xml(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut open: Vec<OpenParagraph> = Vec::new();
    let mut in_text = false;
    let mut in_properties = 0usize;

    loop {
        match reader.read_event().map_err(extraction_error)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => open.push(OpenParagraph::default()),
                b"t" => in_text = true,
                b"pPr" | b"rPr" => in_properties += 1,
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"p" => {
                    if let Some(finished) = open.pop() {
                        close_paragraph(&mut open, &mut paragraphs, finished);
                    }
                }
                b"t" => in_text = false,
                b"pPr" | b"rPr" => in_properties = in_properties.saturating_sub(1),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" => close_paragraph(&mut open, &mut paragraphs, OpenParagraph::default()),
                // Tab stops and breaks declared inside properties are layout, not content
                b"br" | b"cr" if in_properties == 0 => push_char(&mut open, '\n'),
                b"tab" if in_properties == 0 => push_char(&mut open, '\t'),
                _ => {}
            },
            Event::Text(t) if in_text => {
                if let Some(current) = open.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&t));
                }
            }
            Event::GeneralRef(r) if in_text => {
                let name = String::from_utf8_lossy(&r);
                if let Some(current) = open.last_mut() {
                    match resolve_reference(&name) {
                        Some(c) => current.text.push(c),
                        None => {
                            current.text.push('&');
                            current.text.push_str(&name);
                            current.text.push(';');
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    // Unterminated paragraphs still contribute their text
    while let Some(unclosed) = open.pop() {
        close_paragraph(&mut open, &mut paragraphs, unclosed);
    }

    Ok(paragraphs)
}

fn close_paragraph(open: &mut [OpenParagraph], paragraphs: &mut Vec<String>, finished: OpenParagraph) {
    let target = match open.last_mut() {
        Some(parent) => &mut parent.nested,
        None => paragraphs,
    };
    target.push(finished.text);
    target.extend(finished.nested);
}

fn push_char(open: &mut [OpenParagraph], c: char) {
    if let Some(current) = open.last_mut() {
        current.text.push(c);
    }
}

/// Resolves predefined XML entities and numeric character references.
fn resolve_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let numeric = name.strip_prefix('#')?;
            let code = match numeric.strip_prefix('x').or_else(|| numeric.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => numeric.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Renders `text` as a single-paragraph DOCX package.
///
/// Newlines inside the text become `w:br` line breaks and tabs become `w:tab`.
pub fn render(text: &str) -> Result<Vec<u8>> {
    let document_xml = document_xml(text);

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, content) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        (DOCUMENT_PART, document_xml.as_str()),
    ] {
        writer.start_file(name, options).map_err(render_error)?;
        writer.write_all(content.as_bytes()).map_err(render_error)?;
    }

    let cursor = writer.finish().map_err(render_error)?;
    Ok(cursor.into_inner())
}

fn document_xml(text: &str) -> String {
    let mut xml = String::from(DOCUMENT_HEAD);
    xml.push_str("<w:p><w:r>");
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            xml.push_str("<w:br/>");
        }
        for (segment_index, segment) in line.trim_end_matches('\r').split('\t').enumerate() {
            if segment_index > 0 {
                xml.push_str("<w:tab/>");
            }
            xml.push_str("<w:t xml:space=\"preserve\">");
            xml.push_str(&quick_xml::escape::escape(segment));
            xml.push_str("</w:t>");
        }
    }
    xml.push_str("</w:r></w:p>");
    xml.push_str(DOCUMENT_TAIL);
    xml
}

fn extraction_error(err: impl std::fmt::Display) -> TolkError {
    TolkError::extraction(DocumentKind::Docx, err.to_string())
}

fn render_error(err: impl std::fmt::Display) -> TolkError {
    TolkError::render(DocumentKind::Docx, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package_with_body(body: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        writer.start_file(DOCUMENT_PART, options).unwrap();
        let xml = format!("{DOCUMENT_HEAD}{body}{DOCUMENT_TAIL}");
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extract_joins_paragraphs_with_newlines() {
        let bytes = package_with_body(
            "<w:p><w:r><w:t>Hallo</w:t></w:r><w:r><w:t xml:space=\"preserve\"> Welt</w:t></w:r></w:p>\
             <w:p/>\
             <w:p><w:pPr><w:tabs><w:tab w:val=\"left\" w:pos=\"720\"/></w:tabs></w:pPr><w:r><w:t>Zweiter</w:t><w:tab/><w:t>Absatz</w:t></w:r></w:p>",
        );

        let text = extract_text(&bytes).unwrap();
        assert_eq!(text, "Hallo Welt\n\nZweiter\tAbsatz");
    }

    #[test]
    fn test_extract_resolves_entities() {
        let bytes = package_with_body(
            "<w:p><w:r><w:t>Fish &amp; Chips &lt;3 &#228;&#x00FC;</w:t></w:r></w:p>",
        );
        assert_eq!(extract_text(&bytes).unwrap(), "Fish & Chips <3 äü");
    }

    #[test]
    fn test_extract_keeps_text_around_nested_text_box() {
        let bytes = package_with_body(
            "<w:p><w:r><w:t>Before</w:t></w:r>\
             <w:r><w:pict><v:textbox xmlns:v=\"urn:schemas-microsoft-com:vml\"><w:txbxContent>\
             <w:p><w:r><w:t>Inner</w:t></w:r></w:p>\
             </w:txbxContent></v:textbox></w:pict></w:r>\
             <w:r><w:t xml:space=\"preserve\"> After</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Next</w:t></w:r></w:p>",
        );

        let text = extract_text(&bytes).unwrap();
        assert_eq!(text, "Before After\nInner\nNext");
    }

    #[test]
    fn test_extract_rejects_non_zip_bytes() {
        let err = extract_text(b"definitely not a docx").unwrap_err();
        assert!(err.is_extraction());
        assert!(err.to_string().contains("DOCX"));
    }

    #[test]
    fn test_extract_requires_document_part() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        assert!(extract_text(&bytes).unwrap_err().is_extraction());
    }

    #[test]
    fn test_render_produces_readable_package() {
        let bytes = render("Good morning\nFish & Chips\t<today>").unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        assert!(archive.by_name("[Content_Types].xml").is_ok());
        assert!(archive.by_name("_rels/.rels").is_ok());

        let text = extract_text(&bytes).unwrap();
        assert_eq!(text, "Good morning\nFish & Chips\t<today>");
    }

    #[test]
    fn test_document_xml_escapes_markup() {
        let xml = document_xml("a < b & c");
        assert!(xml.contains("a &lt; b &amp; c"));
        assert!(!xml.contains("<w:br/>"));
    }
}
