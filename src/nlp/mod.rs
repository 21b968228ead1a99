// NLP module for textlens
pub mod emotion;
pub mod model;
pub mod sentiment;
pub mod summarization;

pub use emotion::{EmotionLexicon, EmotionScorer, EmotionScores};
pub use model::{Entity, EntityLabel, LanguageModel};
pub use sentiment::{LexiconSentiment, PolarityScorer, Sentiment, SentimentLabel};
pub use summarization::summarize_text_content;
