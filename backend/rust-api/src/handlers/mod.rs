use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::metrics;
use crate::services::AppState;

/// Liveness only. The oracle is never pinged here; `/api/test` exists for
/// that and costs a real completion.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "kanga-api",
        "version": env!("CARGO_PKG_VERSION"),
        "oracle": {
            "configured": state.oracle.is_configured(),
            "base_url": state.config.openai_base_url,
            "model": state.config.openai_model,
        }
    }))
}

pub async fn metrics_handler() -> impl IntoResponse {
    match metrics::render_metrics() {
        Ok(metrics_text) => (StatusCode::OK, metrics_text),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to render metrics: {}", e),
        ),
    }
}

pub mod quiz;
