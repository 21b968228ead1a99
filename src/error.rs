use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use thiserror::Error;

/// Rejection of an analysis request before any analyzer runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No text provided")]
    MissingText,
    #[error("Empty text provided")]
    EmptyText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Sentiment,
    Entities,
    Emotions,
    Summary,
}

impl Feature {
    fn failure_name(&self) -> &'static str {
        match self {
            Feature::Sentiment => "Sentiment analysis",
            Feature::Entities => "Named Entity Recognition",
            Feature::Emotions => "Emotion analysis",
            Feature::Summary => "Text summarization",
        }
    }

    fn disabled_name(&self) -> &'static str {
        match self {
            Feature::Sentiment => "sentiment",
            Feature::Entities => "NER",
            Feature::Emotions => "emotions",
            Feature::Summary => "summarization",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.failure_name())
    }
}

/// A single analyzer's failure. Its display text is the warning reported to clients.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Language model not available - {} disabled", .0.disabled_name())]
    ModelUnavailable(Feature),
    #[error("{feature} failed: {source}")]
    Failed {
        feature: Feature,
        #[source]
        source: anyhow::Error,
    },
}

impl AnalyzerError {
    pub fn failed(feature: Feature, source: anyhow::Error) -> Self {
        AnalyzerError::Failed { feature, source }
    }

    pub fn feature(&self) -> Feature {
        match self {
            AnalyzerError::ModelUnavailable(feature) => *feature,
            AnalyzerError::Failed { feature, .. } => *feature,
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
