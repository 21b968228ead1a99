// Analysis orchestrator: runs the sentiment, entity, emotion and summary analyzers
// one after another over a single text and folds their failures into warnings.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{AnalyzerError, Feature, ValidationError};
use crate::nlp::{
    summarize_text_content, EmotionLexicon, EmotionScorer, EmotionScores, Entity, LanguageModel,
    LexiconSentiment, PolarityScorer, Sentiment,
};

/// A validated analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub text: String,
}

impl AnalysisRequest {
    /// Validate a raw JSON request body of the form `{"text": "..."}`.
    ///
    /// An unparseable body, a non-object body, a missing `text` key and a
    /// non-string `text` value are all reported as missing text.
    pub fn from_json(body: &[u8]) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| ValidationError::MissingText)?;
        let text = value
            .get("text")
            .and_then(Value::as_str)
            .ok_or(ValidationError::MissingText)?;
        Self::new(text)
    }

    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }
        Ok(Self { text })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    pub entities: Vec<Entity>,
    pub emotions: EmotionScores,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl AnalysisResult {
    fn record<T>(&mut self, outcome: Result<T, AnalyzerError>, apply: impl FnOnce(&mut Self, T)) {
        match outcome {
            Ok(value) => apply(self, value),
            Err(err) => {
                warn!(feature = ?err.feature(), "{}", err);
                self.warnings.push(err.to_string());
            }
        }
    }
}

/// Readiness of each analyzer, serialized with the wire names clients of
/// `/health` already depend on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    #[serde(rename = "spacy_loaded")]
    pub model_loaded: bool,
    #[serde(rename = "textblob_available")]
    pub sentiment_available: bool,
    #[serde(rename = "nrclex_available")]
    pub emotions_available: bool,
    #[serde(rename = "textblob_working")]
    pub sentiment_working: bool,
    #[serde(rename = "textblob_error", skip_serializing_if = "Option::is_none")]
    pub sentiment_error: Option<String>,
    #[serde(rename = "nrclex_working")]
    pub emotions_working: bool,
    #[serde(rename = "nrclex_error", skip_serializing_if = "Option::is_none")]
    pub emotions_error: Option<String>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.model_loaded && self.sentiment_working && self.emotions_working
    }
}

pub struct Analyzer {
    model: Option<Arc<LanguageModel>>,
    sentiment: Box<dyn PolarityScorer>,
    emotions: Box<dyn EmotionScorer>,
}

impl Analyzer {
    /// Analyzer backed by the built-in lexicon scorers. `model` is `None`
    /// when the language model failed to load; entity recognition and
    /// summarization then report warnings instead of results.
    pub fn new(model: Option<Arc<LanguageModel>>) -> Self {
        Self::with_scorers(model, Box::new(LexiconSentiment::new()), Box::new(EmotionLexicon::new()))
    }

    pub fn with_scorers(
        model: Option<Arc<LanguageModel>>,
        sentiment: Box<dyn PolarityScorer>,
        emotions: Box<dyn EmotionScorer>,
    ) -> Self {
        Self { model, sentiment, emotions }
    }

    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn analyze(&self, text: &str) -> AnalysisResult {
        debug!(chars = text.len(), "analyzing text");
        let mut result = AnalysisResult::default();

        result.record(self.sentiment(text), |r, sentiment| r.sentiment = sentiment);
        result.record(self.entities(text), |r, entities| r.entities = entities);
        result.record(self.emotions(text), |r, emotions| r.emotions = emotions);
        result.record(self.summary(text), |r, summary| r.summary = summary);

        result
    }

    pub fn sentiment(&self, text: &str) -> Result<Sentiment, AnalyzerError> {
        let score = self
            .sentiment
            .polarity(text)
            .map_err(|e| AnalyzerError::failed(Feature::Sentiment, e))?;
        if !score.is_finite() {
            return Err(AnalyzerError::failed(
                Feature::Sentiment,
                anyhow!("polarity {} is not a finite number", score),
            ));
        }
        Ok(Sentiment::from_polarity(score.clamp(-1.0, 1.0)))
    }

    pub fn entities(&self, text: &str) -> Result<Vec<Entity>, AnalyzerError> {
        let model = self.require_model(Feature::Entities)?;
        Ok(model.entities(text))
    }

    pub fn emotions(&self, text: &str) -> Result<EmotionScores, AnalyzerError> {
        self.emotions
            .raw_scores(text)
            .map_err(|e| AnalyzerError::failed(Feature::Emotions, e))
    }

    pub fn summary(&self, text: &str) -> Result<String, AnalyzerError> {
        let model = self.require_model(Feature::Summary)?;
        summarize_text_content(model, text).map_err(|e| AnalyzerError::failed(Feature::Summary, e))
    }

    /// Probe each analyzer with a fixed input.
    pub fn health(&self) -> HealthReport {
        let sentiment_error = self.sentiment.polarity("test").err().map(|e| e.to_string());
        let emotions_error = self.emotions.raw_scores("test").err().map(|e| e.to_string());

        let mut report = HealthReport {
            status: "healthy",
            model_loaded: self.model_loaded(),
            sentiment_available: true,
            emotions_available: true,
            sentiment_working: sentiment_error.is_none(),
            sentiment_error,
            emotions_working: emotions_error.is_none(),
            emotions_error,
        };
        if !report.is_healthy() {
            report.status = "unhealthy";
        }
        report
    }

    fn require_model(&self, feature: Feature) -> Result<&LanguageModel, AnalyzerError> {
        self.model
            .as_deref()
            .ok_or(AnalyzerError::ModelUnavailable(feature))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::nlp::SentimentLabel;
    use anyhow::{bail, Result};

    pub(crate) struct BrokenSentiment;

    impl PolarityScorer for BrokenSentiment {
        fn polarity(&self, _text: &str) -> Result<f64> {
            bail!("lexicon unavailable")
        }
    }

    pub(crate) struct BrokenEmotions;

    impl EmotionScorer for BrokenEmotions {
        fn raw_scores(&self, _text: &str) -> Result<EmotionScores> {
            bail!("lexicon unavailable")
        }
    }

    struct NanSentiment;

    impl PolarityScorer for NanSentiment {
        fn polarity(&self, _text: &str) -> Result<f64> {
            Ok(f64::NAN)
        }
    }

    fn analyzer() -> Analyzer {
        Analyzer::new(Some(Arc::new(LanguageModel::english().unwrap())))
    }

    #[test]
    fn test_request_validation() {
        assert_eq!(
            AnalysisRequest::from_json(br#"{"text": "hello"}"#).unwrap().text,
            "hello"
        );
        assert_eq!(AnalysisRequest::from_json(b""), Err(ValidationError::MissingText));
        assert_eq!(AnalysisRequest::from_json(b"not json"), Err(ValidationError::MissingText));
        assert_eq!(AnalysisRequest::from_json(b"[1, 2]"), Err(ValidationError::MissingText));
        assert_eq!(AnalysisRequest::from_json(br#"{"body": "x"}"#), Err(ValidationError::MissingText));
        assert_eq!(AnalysisRequest::from_json(br#"{"text": 5}"#), Err(ValidationError::MissingText));
        assert_eq!(AnalysisRequest::from_json(br#"{"text": ""}"#), Err(ValidationError::EmptyText));
        assert_eq!(AnalysisRequest::from_json(br#"{"text": " \n\t "}"#), Err(ValidationError::EmptyText));
    }

    #[test]
    fn test_request_keeps_original_text() {
        let req = AnalysisRequest::new("  padded  ").unwrap();
        assert_eq!(req.text, "  padded  ");
    }

    #[test]
    fn test_full_analysis_has_no_warnings() {
        let result = analyzer().analyze("I love sunny days. I hate traffic jams.");
        assert!(result.warnings.is_empty());
        assert!((-1.0..=1.0).contains(&result.sentiment.score));
        assert_ne!(result.sentiment.label, SentimentLabel::Unknown);
        assert!(!result.emotions.is_empty());
        assert_eq!(result.summary, "I love sunny days.");

        let json = serde_json::to_value(&result).unwrap();
        let obj = json.as_object().unwrap();
        for key in ["sentiment", "entities", "emotions", "summary"] {
            assert!(obj.contains_key(key), "missing {}", key);
        }
        assert!(!obj.contains_key("warnings"));
    }

    #[test]
    fn test_entities_found_with_model() {
        let result = analyzer().analyze("Barack Obama was born in Hawaii.");
        assert!(!result.entities.is_empty());
        assert!(result.entities.iter().any(|e| e.text == "Barack Obama"));
    }

    #[test]
    fn test_missing_model_disables_ner_and_summary() {
        let result = Analyzer::new(None).analyze("Barack Obama was born in Hawaii. It was sunny.");
        assert!(result.entities.is_empty());
        assert_eq!(result.summary, "");
        assert_eq!(
            result.warnings,
            vec![
                "Language model not available - NER disabled".to_string(),
                "Language model not available - summarization disabled".to_string(),
            ]
        );
        // the model-free analyzers still ran
        assert_ne!(result.sentiment.label, SentimentLabel::Unknown);
        assert!(!result.emotions.is_empty());
    }

    #[test]
    fn test_failing_scorers_become_warnings() {
        let analyzer = Analyzer::with_scorers(
            Some(Arc::new(LanguageModel::english().unwrap())),
            Box::new(BrokenSentiment),
            Box::new(BrokenEmotions),
        );
        let result = analyzer.analyze("Barack Obama was born in Hawaii.");
        assert_eq!(result.sentiment, Sentiment::default());
        assert!(result.emotions.is_empty());
        assert!(!result.entities.is_empty());
        assert!(!result.summary.is_empty());
        assert_eq!(
            result.warnings,
            vec![
                "Sentiment analysis failed: lexicon unavailable".to_string(),
                "Emotion analysis failed: lexicon unavailable".to_string(),
            ]
        );
    }

    #[test]
    fn test_non_finite_polarity_is_a_failure() {
        let analyzer = Analyzer::with_scorers(None, Box::new(NanSentiment), Box::new(EmotionLexicon::new()));
        assert!(analyzer.sentiment("anything").is_err());
    }

    #[test]
    fn test_health_reports_all_working() {
        let report = analyzer().health();
        assert!(report.is_healthy());
        assert_eq!(report.status, "healthy");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "healthy",
                "spacy_loaded": true,
                "textblob_available": true,
                "nrclex_available": true,
                "textblob_working": true,
                "nrclex_working": true,
            })
        );
    }

    #[test]
    fn test_health_unhealthy_without_model_or_with_broken_scorer() {
        assert_eq!(Analyzer::new(None).health().status, "unhealthy");

        let broken = Analyzer::with_scorers(
            Some(Arc::new(LanguageModel::english().unwrap())),
            Box::new(LexiconSentiment::new()),
            Box::new(BrokenEmotions),
        );
        let report = broken.health();
        assert_eq!(report.status, "unhealthy");
        assert!(!report.emotions_working);
        assert_eq!(report.emotions_error.as_deref(), Some("lexicon unavailable"));
    }
}
