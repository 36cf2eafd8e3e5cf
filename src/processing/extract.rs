//! File-type dispatch and text extraction.
//!
//! Uploaded bytes are converted into [`Segment`]s based on the filename extension:
//!
//! - `txt`/`md`: UTF-8 decode, then character-window chunking.
//! - `pdf`: per-page text via `lopdf`, one segment per non-empty page.
//! - `docx`: paragraph text pulled from `word/document.xml`, concatenated with
//!   newlines, then chunked.
//!
//! Whitespace-only pages are dropped silently; a document with no non-whitespace text
//! at all is rejected with [`ExtractError::EmptyContent`].

use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use super::chunking::split_text;
use super::types::{ExtractError, Segment, SegmentSource};

/// Convert uploaded bytes into retrievable segments.
///
/// `window` and `overlap` configure the chunker for text-like formats.
pub fn extract(
    bytes: &[u8],
    filename: &str,
    window: usize,
    overlap: usize,
) -> Result<Vec<Segment>, ExtractError> {
    match file_extension(filename).as_str() {
        "txt" | "md" => {
            let text = String::from_utf8(bytes.to_vec())?;
            chunked_segments(&text, SegmentSource::PlainText, window, overlap)
        }
        "pdf" => segments_from_pages(pdf_pages(bytes)?),
        "docx" => {
            let text = docx_paragraphs(bytes)?.join("\n");
            chunked_segments(&text, SegmentSource::ParagraphStructured, window, overlap)
        }
        extension => Err(ExtractError::UnsupportedFormat {
            extension: extension.to_string(),
        }),
    }
    .map(|segments| {
        tracing::debug!(filename, segments = segments.len(), "Extracted document");
        segments
    })
}

/// Extract the full text of an upload as a single string, for summarization.
pub fn extract_plain_text(bytes: &[u8], filename: &str) -> Result<String, ExtractError> {
    match file_extension(filename).as_str() {
        "txt" | "md" => Ok(String::from_utf8(bytes.to_vec())?),
        "pdf" => Ok(pdf_pages(bytes)?.join("\n")),
        "docx" => Ok(docx_paragraphs(bytes)?.join("\n")),
        extension => Err(ExtractError::UnsupportedFormat {
            extension: extension.to_string(),
        }),
    }
}

fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn chunked_segments(
    text: &str,
    source: SegmentSource,
    window: usize,
    overlap: usize,
) -> Result<Vec<Segment>, ExtractError> {
    if text.trim().is_empty() {
        return Err(ExtractError::EmptyContent);
    }
    let chunks = split_text(text, window, overlap)?;
    Ok(chunks
        .into_iter()
        .enumerate()
        .map(|(index, chunk)| Segment {
            text: chunk,
            source,
            position: index as u32 + 1,
        })
        .collect())
}

/// Build one segment per non-whitespace page, keeping 1-based page numbers.
///
/// Pages yielding only whitespace are skipped without renumbering the rest.
pub(crate) fn segments_from_pages(pages: Vec<String>) -> Result<Vec<Segment>, ExtractError> {
    let segments: Vec<Segment> = pages
        .into_iter()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(index, text)| Segment {
            text,
            source: SegmentSource::Paged,
            position: index as u32 + 1,
        })
        .collect();

    if segments.is_empty() {
        return Err(ExtractError::EmptyContent);
    }
    Ok(segments)
}

fn pdf_pages(bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
    let document = lopdf::Document::load_mem(bytes).map_err(ExtractError::Pdf)?;
    let mut pages = Vec::new();
    for page_number in document.get_pages().keys() {
        let text = document
            .extract_text(&[*page_number])
            .map_err(ExtractError::Pdf)?;
        pages.push(text);
    }
    Ok(pages)
}

/// Pull paragraph texts out of a DOCX archive, dropping empty paragraphs.
fn docx_paragraphs(bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
    let cursor = std::io::Cursor::new(bytes);
    let mut archive =
        zip::ZipArchive::new(cursor).map_err(|err| ExtractError::Docx(err.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|err| ExtractError::Docx(err.to_string()))?
        .read_to_string(&mut xml)
        .map_err(|err| ExtractError::Docx(err.to_string()))?;

    let mut reader = Reader::from_str(&xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) => match element.name().as_ref() {
                b"w:p" => current.clear(),
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Ok(Event::Text(text)) if in_text_run => {
                let value = text
                    .unescape()
                    .map_err(|err| ExtractError::Docx(err.to_string()))?;
                current.push_str(&value);
            }
            Ok(Event::End(element)) => match element.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => {
                    if !current.trim().is_empty() {
                        paragraphs.push(current.clone());
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(err) => return Err(ExtractError::Docx(err.to_string())),
            _ => {}
        }
    }

    Ok(paragraphs)
}
