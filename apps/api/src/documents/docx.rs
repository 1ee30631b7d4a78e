//! DOCX text extraction.
//!
//! A DOCX file is a ZIP archive of WordprocessingML parts. Résumé content
//! routinely lives outside the main body — name/contact blocks in headers,
//! skill grids in tables, sidebars in text boxes — so this walks
//! `word/header*.xml`, `word/document.xml`, and `word/footer*.xml` in that
//! order and streams every part for text runs. Tables and text boxes need no
//! special casing: their paragraphs appear in document order within the part.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::documents::ExtractError;

pub fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::ExtractionFailed(format!("not a valid DOCX archive: {e}")))?;

    let mut headers: Vec<String> = Vec::new();
    let mut footers: Vec<String> = Vec::new();
    let mut has_document = false;
    for name in archive.file_names() {
        if name.starts_with("word/header") && name.ends_with(".xml") {
            headers.push(name.to_string());
        } else if name.starts_with("word/footer") && name.ends_with(".xml") {
            footers.push(name.to_string());
        } else if name == "word/document.xml" {
            has_document = true;
        }
    }
    if !has_document {
        return Err(ExtractError::ExtractionFailed(
            "archive has no word/document.xml part".to_string(),
        ));
    }
    headers.sort();
    footers.sort();

    let mut text = String::new();
    let parts = headers
        .iter()
        .map(String::as_str)
        .chain(std::iter::once("word/document.xml"))
        .chain(footers.iter().map(String::as_str));
    for part in parts {
        let xml = read_part(&mut archive, part)?;
        collect_part_text(&xml, &mut text)?;
        // Section boundary between parts
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
    }
    Ok(text)
}

fn read_part(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    name: &str,
) -> Result<String, ExtractError> {
    let mut file = archive
        .by_name(name)
        .map_err(|e| ExtractError::ExtractionFailed(format!("missing part {name}: {e}")))?;
    let mut xml = String::new();
    file.read_to_string(&mut xml)
        .map_err(|e| ExtractError::ExtractionFailed(format!("unreadable part {name}: {e}")))?;
    Ok(xml)
}

/// Streams one WordprocessingML part, appending its text to `out`.
///
/// Paragraph ends become line breaks, tabs and explicit breaks are kept.
/// `mc:Fallback` subtrees are skipped: AlternateContent text boxes carry the
/// same `w:txbxContent` in both the `mc:Choice` and the fallback drawing,
/// and emitting both would duplicate every text box.
fn collect_part_text(xml: &str, out: &mut String) -> Result<(), ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut in_text = false;
    let mut fallback_depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"mc:Fallback" => fallback_depth += 1,
                b"w:t" if fallback_depth == 0 => in_text = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"mc:Fallback" => fallback_depth = fallback_depth.saturating_sub(1),
                b"w:t" => in_text = false,
                b"w:p" if fallback_depth == 0 => out.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) if fallback_depth == 0 => match e.name().as_ref() {
                b"w:tab" => out.push('\t'),
                b"w:br" | b"w:cr" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let run = t
                    .unescape()
                    .map_err(|e| ExtractError::ExtractionFailed(format!("invalid XML text: {e}")))?;
                out.push_str(&run);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractError::ExtractionFailed(format!(
                    "invalid WordprocessingML: {e}"
                )))
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::io::{Cursor, Write};

    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    pub const DOCUMENT_XML_SHORT: &str =
        "<w:document xmlns:w=\"ns\"><w:body><w:p><w:r><w:t>Too short</w:t></w:r></w:p></w:body></w:document>";

    /// Builds an in-memory DOCX archive from (part name, XML) pairs.
    pub fn docx_bytes(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = ZipWriter::new(&mut cursor);
            for (name, xml) in parts {
                writer
                    .start_file(name.to_string(), SimpleFileOptions::default())
                    .unwrap();
                writer.write_all(xml.as_bytes()).unwrap();
            }
            writer.finish().unwrap();
        }
        cursor.into_inner()
    }

    /// A DOCX with only a main document part.
    pub fn simple_docx(document_xml: &str) -> Vec<u8> {
        docx_bytes(&[("word/document.xml", document_xml)])
    }

    /// A realistic résumé DOCX: contact block in the header, skills in a
    /// table, enough body text to clear the extraction threshold.
    pub fn resume_docx() -> Vec<u8> {
        let header = "<w:hdr xmlns:w=\"ns\"><w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>\
                      <w:p><w:r><w:t>jane@example.com | +1 555 0100</w:t></w:r></w:p></w:hdr>";
        let document = "<w:document xmlns:w=\"ns\"><w:body>\
                        <w:p><w:r><w:t>Senior Backend Engineer with ten years of experience \
                        designing and operating distributed systems.</w:t></w:r></w:p>\
                        <w:tbl><w:tr>\
                        <w:tc><w:p><w:r><w:t>Rust</w:t></w:r></w:p></w:tc>\
                        <w:tc><w:p><w:r><w:t>PostgreSQL</w:t></w:r></w:p></w:tc>\
                        </w:tr></w:tbl>\
                        </w:body></w:document>";
        docx_bytes(&[
            ("word/header1.xml", header),
            ("word/document.xml", document),
        ])
    }
}
