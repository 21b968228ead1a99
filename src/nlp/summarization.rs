// Text Summarization module using extractive approach
// Sentences are scored by the normalized frequency of their content words and the top 30% are kept.
use anyhow::Result;
use std::cmp::Ordering;
use std::collections::HashMap;

use super::model::LanguageModel;

/// Number of sentences kept for a document of `sentence_count` sentences:
/// 30% rounded down, and never fewer than one.
pub fn summary_length(sentence_count: usize) -> usize {
    (sentence_count * 3 / 10).max(1)
}

pub fn summarize_text_content(model: &LanguageModel, text: &str) -> Result<String> {
    let frequencies = word_frequencies(model, text);

    let sentences = model.sentences(text);
    let mut sentence_scores: Vec<(usize, f64)> = Vec::new();
    for (idx, sentence) in sentences.iter().enumerate() {
        let mut score: Option<f64> = None;
        for token in model.tokens(sentence.text) {
            if let Some(weight) = frequencies.get(&token.lower()) {
                *score.get_or_insert(0.0) += weight;
            }
        }
        if let Some(score) = score {
            sentence_scores.push((idx, score));
        }
    }

    // stable sort: equal scores keep document order
    sentence_scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let mut selected: Vec<usize> = sentence_scores
        .into_iter()
        .take(summary_length(sentences.len()))
        .map(|(idx, _)| idx)
        .collect();
    selected.sort_unstable();

    let summary: Vec<&str> = selected.iter().map(|&idx| sentences[idx].text).collect();
    Ok(summary.join(" "))
}

// Frequencies of non-stopword, non-punctuation tokens keyed by lower-cased
// form, divided by the highest frequency.
fn word_frequencies(model: &LanguageModel, text: &str) -> HashMap<String, f64> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for token in model.tokens(text) {
        let lower = token.lower();
        if model.is_stop_word(&lower) || model.is_punctuation(&lower) {
            continue;
        }
        *counts.entry(lower).or_insert(0) += 1;
    }

    let Some(max_freq) = counts.values().copied().max() else {
        return HashMap::new();
    };
    counts
        .into_iter()
        .map(|(word, count)| (word, count as f64 / max_freq as f64))
        .collect()
}
