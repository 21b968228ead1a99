// Sentiment Analysis module using a lexicon-based polarity approach.
// Each known word carries a polarity in [-1, 1]; the text score is the mean over matched words.
use anyhow::Result;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const POSITIVE_THRESHOLD: f64 = 0.1;
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

const INTENSIFIER_FACTOR: f64 = 1.3;
const NEGATION_FACTOR: f64 = -0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Unknown,
}

impl SentimentLabel {
    pub fn from_polarity(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if score < NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    pub score: f64,
}

impl Sentiment {
    pub fn from_polarity(score: f64) -> Self {
        Self { label: SentimentLabel::from_polarity(score), score }
    }
}

impl Default for Sentiment {
    fn default() -> Self {
        Self { label: SentimentLabel::Unknown, score: 0.0 }
    }
}

/// Produces a polarity score in [-1, 1] for a piece of text.
pub trait PolarityScorer: Send + Sync {
    fn polarity(&self, text: &str) -> Result<f64>;
}

static POLARITY: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        ("good", 0.7), ("great", 0.8), ("excellent", 1.0), ("wonderful", 1.0),
        ("fantastic", 0.4), ("amazing", 0.6), ("awesome", 1.0), ("love", 0.5),
        ("loved", 0.7), ("lovely", 0.5), ("happy", 0.8), ("joy", 0.8), ("pleased", 0.5),
        ("delighted", 0.7), ("satisfied", 0.5), ("perfect", 1.0), ("beautiful", 0.85),
        ("brilliant", 0.9), ("outstanding", 0.5), ("superb", 1.0), ("magnificent", 1.0),
        ("marvelous", 0.8), ("terrific", 1.0), ("fabulous", 0.4), ("exceptional", 0.67),
        ("impressive", 1.0), ("remarkable", 0.75), ("best", 1.0), ("better", 0.5),
        ("positive", 0.23), ("success", 0.3), ("successful", 0.75), ("win", 0.8),
        ("enjoy", 0.4), ("pleasant", 0.73), ("comfortable", 0.4), ("excited", 0.38),
        ("exciting", 0.3), ("thrilled", 0.6), ("like", 0.2), ("favorite", 0.5),
        ("nice", 0.6), ("fun", 0.3), ("sunny", 0.3), ("bright", 0.7), ("kind", 0.6),
        ("bad", -0.7), ("terrible", -1.0), ("awful", -1.0), ("horrible", -1.0),
        ("poor", -0.4), ("worst", -1.0), ("worse", -0.4), ("hate", -0.8),
        ("hated", -0.9), ("angry", -0.5), ("sad", -0.5), ("upset", -0.4),
        ("disappointed", -0.75), ("dissatisfied", -0.5), ("unhappy", -0.6),
        ("fail", -0.5), ("failure", -0.32), ("failed", -0.5), ("problem", -0.2),
        ("wrong", -0.5), ("difficult", -0.5), ("hard", -0.29), ("broken", -0.4),
        ("painful", -0.7), ("hurt", -0.4), ("damaged", -0.4), ("disaster", -0.6),
        ("negative", -0.3), ("lost", -0.2), ("defeated", -0.5), ("rejected", -0.5),
        ("unpleasant", -0.5), ("uncomfortable", -0.5), ("disappointing", -0.6),
        ("frustrated", -0.7), ("frustrating", -0.4), ("ugly", -0.7), ("boring", -1.0),
        ("stupid", -0.8), ("annoying", -0.8), ("dangerous", -0.6), ("scary", -0.5),
    ]
    .into_iter()
    .collect()
});

static INTENSIFIERS: &[&str] = &["very", "extremely", "absolutely", "really", "incredibly", "highly", "totally"];

static NEGATIONS: &[&str] = &[
    "not", "no", "never", "nothing", "nobody", "nowhere", "neither", "nor", "none",
    "don't", "doesn't", "didn't", "isn't", "wasn't", "can't", "won't", "n't",
];

#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconSentiment;

impl LexiconSentiment {
    pub fn new() -> Self {
        Self
    }
}

impl PolarityScorer for LexiconSentiment {
    fn polarity(&self, text: &str) -> Result<f64> {
        let words: Vec<String> = text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .map(|s| s.trim_matches('\''))
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        let mut scores = Vec::new();
        for (i, word) in words.iter().enumerate() {
            let Some(&base) = POLARITY.get(word.as_str()) else {
                continue;
            };
            let mut score = base;
            if i > 0 && INTENSIFIERS.contains(&words[i - 1].as_str()) {
                score *= INTENSIFIER_FACTOR;
            }
            let negated = (i > 0 && NEGATIONS.contains(&words[i - 1].as_str()))
                || (i > 1 && NEGATIONS.contains(&words[i - 2].as_str()));
            if negated {
                score *= NEGATION_FACTOR;
            }
            scores.push(score.clamp(-1.0, 1.0));
        }

        if scores.is_empty() {
            return Ok(0.0);
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        Ok(mean.clamp(-1.0, 1.0))
    }
}
