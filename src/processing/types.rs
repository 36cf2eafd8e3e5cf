//! Core data types and error definitions for the processing pipeline.

use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// A retrievable unit of extracted document text.
///
/// Segments are created once during extraction and never mutated afterwards; every
/// segment belongs to exactly one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Non-empty text content of the segment.
    pub text: String,
    /// File type the segment was extracted from.
    pub source: SegmentSource,
    /// 1-based page number (paged sources) or chunk index (chunked sources).
    pub position: u32,
}

/// File type tag recorded on each extracted segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentSource {
    /// Plain UTF-8 text, split into chunks.
    PlainText,
    /// Page-oriented document, one segment per non-empty page.
    Paged,
    /// Paragraph-structured document, concatenated then split into chunks.
    ParagraphStructured,
}

impl Segment {
    /// Positional metadata for API responses: `page` for paged sources, `chunk` otherwise.
    pub fn metadata(&self) -> SegmentMetadata {
        match self.source {
            SegmentSource::Paged => SegmentMetadata {
                source: self.source,
                page: Some(self.position),
                chunk: None,
            },
            SegmentSource::PlainText | SegmentSource::ParagraphStructured => SegmentMetadata {
                source: self.source,
                page: None,
                chunk: Some(self.position),
            },
        }
    }
}

/// Serializable positional metadata attached to source previews.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SegmentMetadata {
    /// File type the segment came from.
    pub source: SegmentSource,
    /// 1-based page number, present for paged sources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// 1-based chunk index, present for chunked sources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk: Option<u32>,
}

/// Errors produced while splitting text into character windows.
#[derive(Debug, Error)]
pub enum ChunkingError {
    /// Overlap must leave room for the window to advance.
    #[error("chunk overlap ({overlap}) must be smaller than the window size ({window})")]
    InvalidConfiguration {
        /// Configured window size in characters.
        window: usize,
        /// Configured overlap in characters.
        overlap: usize,
    },
}

/// Errors produced while turning uploaded bytes into segments.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Filename extension did not match a supported format.
    #[error("Unsupported file type '{extension}'. Please upload PDF, DOCX, or TXT files.")]
    UnsupportedFormat {
        /// The rejected extension, lowercased.
        extension: String,
    },
    /// Extraction produced no non-whitespace text.
    #[error("No text content found in the document.")]
    EmptyContent,
    /// Uploaded bytes were not valid UTF-8 for a plain-text format.
    #[error("File is not valid UTF-8 text")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),
    /// PDF could not be parsed.
    #[error("Failed to parse PDF: {0}")]
    Pdf(#[source] lopdf::Error),
    /// DOCX archive or XML could not be parsed.
    #[error("Failed to parse DOCX: {0}")]
    Docx(String),
    /// Chunking step rejected its configuration.
    #[error(transparent)]
    Chunking(#[from] ChunkingError),
}

/// Errors emitted by the document processing pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Extraction step failed to produce segments.
    #[error(transparent)]
    Extract(#[from] ExtractError),
    /// Chunking step rejected its configuration.
    #[error(transparent)]
    Chunking(#[from] ChunkingError),
    /// Store lookup failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Summary of a completed ingestion.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    /// Generated identifier for the stored document.
    pub document_id: String,
    /// Original filename supplied by the client.
    pub filename: String,
    /// Number of segments stored for the document.
    pub segments_stored: usize,
}

/// Result of answering a question over a stored document.
#[derive(Debug, Clone)]
pub struct AnswerOutcome {
    /// Natural-language answer text.
    pub answer: String,
    /// Placeholder confidence score; see [`crate::processing::answer`].
    pub confidence: f64,
    /// Previews of the segments the answer was drawn from.
    pub sources: Vec<SourcePreview>,
}

/// Truncated segment preview returned alongside answers.
#[derive(Debug, Clone, Serialize)]
pub struct SourcePreview {
    /// First 200 characters of the segment text, suffixed with `...`.
    pub content: String,
    /// Positional metadata for the segment.
    pub metadata: SegmentMetadata,
}

/// Result of a summarization request.
#[derive(Debug, Clone)]
pub struct SummaryOutcome {
    /// The produced summary text.
    pub summary: String,
    /// Character count of the input text.
    pub original_length: usize,
    /// Character count of the summary.
    pub summary_length: usize,
    /// `summary_length / original_length`, or 0 for empty input.
    pub compression_ratio: f64,
}
