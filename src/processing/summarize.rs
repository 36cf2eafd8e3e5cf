//! Extractive summarization fallback.
//!
//! When no generative backend is configured the service selects existing sentences
//! instead of writing new text: sentences are scored by summing whole-text word
//! frequencies over their words, the top scorers are kept (earlier sentences win
//! ties), and the selection is reassembled in original order.

use std::collections::HashMap;

use serde::Deserialize;

use super::types::SummaryOutcome;

/// Requested summary style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStyle {
    /// Three-sentence summary.
    #[default]
    Concise,
    /// Five-sentence summary.
    Detailed,
    /// Four sentences, one bulleted line each.
    BulletPoints,
}

impl SummaryStyle {
    /// Number of sentences the extractive summarizer keeps for this style.
    pub fn target_sentences(self) -> usize {
        match self {
            Self::Concise => 3,
            Self::Detailed => 5,
            Self::BulletPoints => 4,
        }
    }
}

/// Produce an extractive summary of `text` in the requested style.
///
/// Sentences are split on the literal `". "` delimiter. Text at or under the style's
/// sentence target is returned unchanged (bullet formatting still applies).
pub fn extractive_summary(text: &str, style: SummaryStyle) -> String {
    let target = style.target_sentences();
    let sentences: Vec<&str> = text.split(". ").collect();
    let bullets = style == SummaryStyle::BulletPoints;

    let selected: Vec<&str> = if sentences.len() <= target {
        if !bullets {
            return text.to_string();
        }
        sentences
    } else {
        select_sentences(text, &sentences, target)
    };

    if bullets {
        selected
            .iter()
            .map(|sentence| sentence.trim())
            .filter(|sentence| !sentence.is_empty())
            .map(|sentence| format!("\u{2022} {sentence}"))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        format!("{}.", selected.join(". "))
    }
}

/// Pick the `target` highest-scoring sentences and restore their original order.
fn select_sentences<'a>(text: &str, sentences: &[&'a str], target: usize) -> Vec<&'a str> {
    let frequencies = word_frequencies(text);

    let mut scored: Vec<(usize, usize)> = sentences
        .iter()
        .enumerate()
        .map(|(index, sentence)| (sentence_score(sentence, &frequencies), index))
        .collect();

    // Stable sort on score alone: equal scores keep the earlier sentence first.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(target);
    scored.sort_by_key(|(_, index)| *index);

    scored
        .into_iter()
        .map(|(_, index)| sentences[index])
        .collect()
}

fn word_frequencies(text: &str) -> HashMap<String, usize> {
    let mut frequencies = HashMap::new();
    for word in text.to_lowercase().split_whitespace() {
        *frequencies.entry(word.to_string()).or_insert(0) += 1;
    }
    frequencies
}

fn sentence_score(sentence: &str, frequencies: &HashMap<String, usize>) -> usize {
    sentence
        .split_whitespace()
        .map(|word| frequencies.get(&word.to_lowercase()).copied().unwrap_or(0))
        .sum()
}

/// Assemble length and compression statistics for a summary.
pub fn summary_outcome(original: &str, summary: String) -> SummaryOutcome {
    let original_length = original.chars().count();
    let summary_length = summary.chars().count();
    let compression_ratio = if original_length == 0 {
        0.0
    } else {
        summary_length as f64 / original_length as f64
    };
    SummaryOutcome {
        summary,
        original_length,
        summary_length,
        compression_ratio,
    }
}
