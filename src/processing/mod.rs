//! Document processing pipeline: extraction, chunking, retrieval, answering, and
//! summarization with heuristic fallbacks.

/// Heuristic answer composition and confidence constants.
pub mod answer;
/// Character-window text splitting.
pub mod chunking;
/// File-type dispatch and text extraction.
pub mod extract;
/// Keyword-overlap retrieval fallback.
pub mod retrieval;
mod service;
/// Extractive summarization fallback.
pub mod summarize;
/// Pipeline data types and errors.
pub mod types;

pub use service::{PipelineApi, PipelineService};
pub use types::{
    AnswerOutcome, ChunkingError, ExtractError, IngestOutcome, PipelineError, Segment,
    SegmentMetadata, SegmentSource, SourcePreview, SummaryOutcome,
};
