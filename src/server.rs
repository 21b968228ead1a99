// HTTP surface: liveness, health and the `/analyze` endpoint.

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::any::Any;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::analysis::{AnalysisRequest, AnalysisResult, Analyzer};
use crate::error::ApiError;

pub const LIVENESS_MESSAGE: &str = "NLP Server is running!";

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
}

pub fn create_router(analyzer: Arc<Analyzer>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/analyze", post(analyze_text))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { analyzer })
}

pub async fn serve(host: &str, port: u16, analyzer: Arc<Analyzer>) -> Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("NLP server listening on http://{}", addr);

    axum::serve(listener, create_router(analyzer))
        .await
        .context("server error")?;
    Ok(())
}

async fn home() -> &'static str {
    LIVENESS_MESSAGE
}

async fn health_check(State(state): State<AppState>) -> Response {
    let report = state.analyzer.health();
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report)).into_response()
}

async fn analyze_text(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnalysisResult>, ApiError> {
    let request = AnalysisRequest::from_json(&body)?;

    // The analyzers are CPU-bound and run back to back on one blocking thread.
    let analyzer = Arc::clone(&state.analyzer);
    let result = tokio::task::spawn_blocking(move || analyzer.analyze(&request.text))
        .await
        .map_err(|e| {
            let message = if e.is_panic() {
                panic_message(e.into_panic())
            } else {
                e.to_string()
            };
            error!("Unexpected error in analyze_text: {}", message);
            ApiError::Internal(message)
        })?;

    Ok(Json(result))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "analysis panicked".to_string()
    }
}
