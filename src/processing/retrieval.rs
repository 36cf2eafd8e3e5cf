//! Keyword-overlap retrieval used when no similarity index is available.
//!
//! Scoring is intentionally elementary: the query and each segment are lowercased and
//! whitespace-tokenized into word sets, and a segment's relevance is the number of
//! distinct query words it contains. Segments with zero overlap are discarded; ties
//! keep the original segment order.

use std::collections::HashSet;

use super::types::Segment;

/// Return up to `max_results` segments ranked by descending keyword overlap.
///
/// Deterministic for a fixed segment list and query; returns an empty vector (not an
/// error) when nothing overlaps.
pub fn keyword_retrieve(segments: &[Segment], query: &str, max_results: usize) -> Vec<Segment> {
    let query_words: HashSet<String> = word_set(query);
    if query_words.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, &Segment)> = segments
        .iter()
        .filter_map(|segment| {
            let overlap = word_set(&segment.text)
                .intersection(&query_words)
                .count();
            (overlap > 0).then_some((overlap, segment))
        })
        .collect();

    // Stable sort preserves first-seen order among equal scores.
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .take(max_results)
        .map(|(_, segment)| segment.clone())
        .collect()
}

fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .map(|word| word.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::types::SegmentSource;

    fn segment(text: &str, position: u32) -> Segment {
        Segment {
            text: text.to_string(),
            source: SegmentSource::PlainText,
            position,
        }
    }

    #[test]
    fn ranks_by_distinct_word_overlap() {
        let segments = vec![
            segment("the cat sat on the mat", 1),
            segment("dogs chase cats in the park", 2),
            segment("quick brown fox jumps", 3),
        ];

        let results = keyword_retrieve(&segments, "where did the cat sat", 10);
        assert_eq!(results.len(), 2);
        // "the cat sat" gives 3 overlapping words; "the" alone gives 1.
        assert_eq!(results[0].position, 1);
        assert_eq!(results[1].position, 2);
    }

    #[test]
    fn repeated_words_count_once() {
        let segments = vec![segment("spam spam spam spam", 1), segment("spam and eggs", 2)];
        let results = keyword_retrieve(&segments, "spam eggs", 10);
        // Second segment matches two distinct words and outranks the repetition.
        assert_eq!(results[0].position, 2);
        assert_eq!(results[1].position, 1);
    }

    #[test]
    fn ties_preserve_original_segment_order() {
        let segments = vec![
            segment("alpha one", 1),
            segment("alpha two", 2),
            segment("alpha three", 3),
        ];
        let results = keyword_retrieve(&segments, "alpha", 10);
        let order: Vec<u32> = results.iter().map(|s| s.position).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn zero_overlap_returns_empty() {
        let segments = vec![segment("completely unrelated content", 1)];
        assert!(keyword_retrieve(&segments, "quantum chromodynamics", 10).is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let segments = vec![segment("The Cat", 1)];
        assert_eq!(keyword_retrieve(&segments, "cat", 10).len(), 1);
    }

    #[test]
    fn results_are_capped_at_max_results() {
        let segments = vec![
            segment("topic a", 1),
            segment("topic b", 2),
            segment("topic c", 3),
        ];
        assert_eq!(keyword_retrieve(&segments, "topic", 2).len(), 2);
    }

    #[test]
    fn retrieval_is_deterministic() {
        let segments = vec![
            segment("one shared word here", 1),
            segment("another shared word there", 2),
        ];
        let first = keyword_retrieve(&segments, "shared word", 10);
        let second = keyword_retrieve(&segments, "shared word", 10);
        assert_eq!(first, second);
    }
}
