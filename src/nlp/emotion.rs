// Emotion scoring against an NRC-style word/emotion lexicon.
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};

/// Raw lexicon match counts keyed by emotion name.
pub type EmotionScores = BTreeMap<String, u32>;

pub trait EmotionScorer: Send + Sync {
    fn raw_scores(&self, text: &str) -> Result<EmotionScores>;
}

pub const EMOTIONS: [&str; 10] = [
    "fear", "anger", "anticipation", "trust", "surprise",
    "positive", "negative", "sadness", "disgust", "joy",
];

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-zA-Z']+").unwrap());

static LEXICON_ENTRIES: &[(&str, &[&str])] = &[
    ("abandon", &["fear", "negative", "sadness"]),
    ("accident", &["fear", "negative", "sadness", "surprise"]),
    ("admire", &["positive", "trust"]),
    ("afraid", &["fear", "negative"]),
    ("anger", &["anger", "negative"]),
    ("angry", &["anger", "disgust", "negative"]),
    ("anxious", &["anticipation", "fear", "negative"]),
    ("attack", &["anger", "fear", "negative"]),
    ("awful", &["anger", "disgust", "fear", "negative", "sadness"]),
    ("bad", &["anger", "disgust", "fear", "negative", "sadness"]),
    ("beautiful", &["joy", "positive"]),
    ("birthday", &["anticipation", "joy", "positive", "surprise"]),
    ("blame", &["anger", "disgust", "negative"]),
    ("celebrate", &["anticipation", "joy", "positive"]),
    ("cheer", &["anticipation", "joy", "positive", "surprise", "trust"]),
    ("crash", &["fear", "negative", "sadness", "surprise"]),
    ("cry", &["negative", "sadness"]),
    ("danger", &["fear", "negative", "sadness"]),
    ("death", &["anger", "anticipation", "disgust", "fear", "negative", "sadness", "surprise"]),
    ("delay", &["negative"]),
    ("disaster", &["anger", "disgust", "fear", "negative", "sadness", "surprise"]),
    ("disgusting", &["anger", "disgust", "fear", "negative"]),
    ("doctor", &["positive", "trust"]),
    ("excited", &["anticipation", "joy", "positive", "surprise", "trust"]),
    ("failure", &["disgust", "fear", "negative", "sadness"]),
    ("fear", &["anger", "fear", "negative"]),
    ("fight", &["anger", "fear", "negative"]),
    ("friend", &["joy", "positive", "trust"]),
    ("gift", &["anticipation", "joy", "positive", "surprise"]),
    ("good", &["anticipation", "joy", "positive", "surprise", "trust"]),
    ("grief", &["negative", "sadness"]),
    ("happy", &["anticipation", "joy", "positive", "trust"]),
    ("hate", &["anger", "disgust", "fear", "negative", "sadness"]),
    ("hope", &["anticipation", "joy", "positive", "surprise", "trust"]),
    ("horrible", &["anger", "disgust", "fear", "negative"]),
    ("hurt", &["anger", "fear", "negative", "sadness"]),
    ("jam", &["negative"]),
    ("joy", &["joy", "positive"]),
    ("kill", &["fear", "negative", "sadness"]),
    ("laugh", &["joy", "positive", "surprise"]),
    ("lonely", &["negative", "sadness"]),
    ("love", &["joy", "positive"]),
    ("lose", &["anger", "disgust", "fear", "negative", "sadness", "surprise"]),
    ("money", &["anger", "anticipation", "joy", "positive", "surprise", "trust"]),
    ("pain", &["fear", "negative", "sadness"]),
    ("peace", &["anticipation", "joy", "positive", "trust"]),
    ("president", &["positive", "trust"]),
    ("proud", &["anticipation", "joy", "positive", "trust"]),
    ("rage", &["anger", "negative"]),
    ("sad", &["negative", "sadness"]),
    ("safe", &["joy", "positive", "trust"]),
    ("scream", &["anger", "disgust", "fear", "negative", "surprise"]),
    ("shock", &["anger", "fear", "negative", "surprise"]),
    ("smile", &["joy", "positive", "surprise", "trust"]),
    ("storm", &["anger", "negative"]),
    ("sudden", &["surprise"]),
    ("sun", &["anticipation", "joy", "positive", "surprise", "trust"]),
    ("sunny", &["anticipation", "joy", "positive", "surprise"]),
    ("surprise", &["fear", "joy", "positive", "surprise"]),
    ("teacher", &["positive", "trust"]),
    ("terrible", &["anger", "disgust", "fear", "negative", "sadness"]),
    ("threat", &["anger", "fear", "negative"]),
    ("traffic", &["anger", "negative"]),
    ("trust", &["trust"]),
    ("truth", &["positive", "trust"]),
    ("ugly", &["disgust", "negative"]),
    ("victory", &["anticipation", "joy", "positive", "trust"]),
    ("war", &["fear", "negative"]),
    ("wedding", &["anticipation", "joy", "positive", "trust"]),
    ("win", &["anticipation", "joy", "positive", "surprise", "trust"]),
    ("wonderful", &["joy", "positive", "surprise", "trust"]),
    ("worry", &["anticipation", "fear", "negative", "sadness"]),
];

static LEXICON: Lazy<HashMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| LEXICON_ENTRIES.iter().copied().collect());

#[derive(Debug, Default, Clone, Copy)]
pub struct EmotionLexicon;

impl EmotionLexicon {
    pub fn new() -> Self {
        Self
    }

    // Exact form first, then a plain plural ("jams" -> "jam").
    fn lookup(word: &str) -> Option<&'static [&'static str]> {
        LEXICON.get(word).copied().or_else(|| {
            word.strip_suffix('s')
                .filter(|stem| !stem.is_empty())
                .and_then(|stem| LEXICON.get(stem).copied())
        })
    }
}

impl EmotionScorer for EmotionLexicon {
    fn raw_scores(&self, text: &str) -> Result<EmotionScores> {
        let mut scores = EmotionScores::new();
        for m in WORD_PATTERN.find_iter(text) {
            let word = m.as_str().trim_matches('\'').to_lowercase();
            if word.is_empty() {
                continue;
            }
            if let Some(emotions) = Self::lookup(&word) {
                for emotion in emotions {
                    *scores.entry(emotion.to_string()).or_insert(0) += 1;
                }
            }
        }
        Ok(scores)
    }
}
