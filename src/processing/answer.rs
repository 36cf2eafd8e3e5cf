//! Heuristic answer composition used when no generative backend is available.

use super::types::Segment;

/// Fixed confidence reported when a generative backend produced the answer.
///
/// Placeholder value kept for behavioral compatibility with the original service; it
/// is not derived from any actual confidence measure.
pub const BACKEND_CONFIDENCE: f64 = 0.8;

/// Fixed confidence reported for heuristic answers, below [`BACKEND_CONFIDENCE`] to
/// reflect the reduced reliability of keyword retrieval plus concatenation.
pub const HEURISTIC_CONFIDENCE: f64 = 0.6;

/// Message returned when retrieval found nothing relevant.
pub const NO_MATCH_MESSAGE: &str =
    "I couldn't find relevant information to answer your question.";

const SEGMENT_PREVIEW_CHARS: usize = 500;
const ANSWER_CONTEXT_CHARS: usize = 800;

/// Compose a template answer from retrieved segments.
///
/// Concatenates the first 500 characters of each segment separated by blank lines,
/// truncates the combination to 800 characters, and prefixes a fixed phrase. This is
/// a placeholder, not comprehension; callers should report [`HEURISTIC_CONFIDENCE`].
pub fn compose_answer(segments: &[Segment]) -> String {
    if segments.is_empty() {
        return NO_MATCH_MESSAGE.to_string();
    }

    let context = segments
        .iter()
        .map(|segment| truncate_chars(&segment.text, SEGMENT_PREVIEW_CHARS))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Based on the document content, here's what I found:\n\n{}...",
        truncate_chars(&context, ANSWER_CONTEXT_CHARS)
    )
}

/// Take the first `limit` characters of `text`, respecting char boundaries.
pub(crate) fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
