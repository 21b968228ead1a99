// textlens: sentiment polarity, named entities, emotion lexicon counts and an
// extractive summary for a piece of text, served over HTTP or run from the command line.

pub mod analysis;
pub mod batch;
pub mod cli;
pub mod error;
pub mod nlp;
pub mod report;
pub mod server;

pub use analysis::{AnalysisRequest, AnalysisResult, Analyzer, HealthReport};
pub use error::{AnalyzerError, ApiError, Feature, ValidationError};
