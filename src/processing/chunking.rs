//! Character-window text splitting.
//!
//! Long extracted text is split into fixed-size windows so retrieval and summarization
//! operate on bounded segments. Consecutive windows share a fixed character overlap so
//! context spanning a boundary stays visible to retrieval. Splitting is deterministic:
//! the same input and configuration always produce the same sequence.

use super::types::ChunkingError;

/// Split `text` into windows of at most `window` characters.
///
/// Each chunk after the first begins with the final `overlap` characters of its
/// predecessor; the final chunk may be shorter than `window`. Stripping that overlap
/// from every chunk after the first and concatenating reconstructs the input exactly.
///
/// Returns an empty vector for empty input and `InvalidConfiguration` when the overlap
/// leaves no room for the window to advance.
pub fn split_text(text: &str, window: usize, overlap: usize) -> Result<Vec<String>, ChunkingError> {
    if window == 0 || overlap >= window {
        return Err(ChunkingError::InvalidConfiguration { window, overlap });
    }
    if text.is_empty() {
        return Ok(Vec::new());
    }

    // Indexing by char keeps windows from landing inside a multi-byte sequence.
    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut start = 0;

    loop {
        let end = (start + window).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start = end - overlap;
    }

    Ok(chunks)
}
