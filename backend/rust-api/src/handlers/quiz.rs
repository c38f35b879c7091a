use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Map, Value};
use std::sync::Arc;

use crate::models::quiz::{
    DebugInfo, ErrorDebugInfo, QuestionResponse, SubmitAnswerRequest, TestResponse,
};
use crate::services::{
    grading_service::GradingService,
    oracle::{ChatMessage, OracleError},
    question_service::{QuestionError, QuestionService},
    AppState,
};

/// `GET /api/test` — one trivial completion to prove the oracle is reachable.
pub async fn test_connection(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    tracing::info!("Testing oracle connection");

    let messages = [ChatMessage::user("Say hello")];

    match state.oracle.complete(&messages, 0.0, None).await {
        Ok(text) => {
            tracing::info!("Oracle test reply: {}", text);
            Ok(Json(TestResponse {
                message: "API is working!".to_string(),
                openai_response: text,
            }))
        }
        Err(e) => {
            tracing::error!("Oracle test failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(test_error_body(&e)),
            ))
        }
    }
}

// `details` is only present when the oracle sent an error body back;
// clients key on its absence.
fn test_error_body(e: &OracleError) -> Value {
    let mut body = Map::new();
    body.insert("error".to_string(), json!(e.to_string()));
    if let Some(details) = e.details() {
        body.insert("details".to_string(), json!(details));
    }
    Value::Object(body)
}

/// `GET /api/question` — one generation call, two-line parse, no retry on
/// malformed output (the caller re-requests).
pub async fn get_question(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    let service = QuestionService::new(state.oracle.clone());

    match service.generate().await {
        Ok(generated) => Ok(Json(QuestionResponse {
            question: generated.question,
            answer: generated.answer,
            debug: DebugInfo::success(),
        })),
        Err(e @ QuestionError::InvalidFormat { .. }) => {
            tracing::error!("Failed to generate question: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Invalid response format from OpenAI" })),
            ))
        }
        Err(QuestionError::Oracle(e)) => {
            tracing::error!("Failed to generate question: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": e.to_string(),
                    "debug": ErrorDebugInfo::new(e.kind(), e.details().map(str::to_string)),
                })),
            ))
        }
    }
}

/// `POST /api/answer` — grading verdict forwarded verbatim as plain text.
pub async fn submit_answer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    let service = GradingService::new(state.oracle.clone());

    match service.grade(&req.question, &req.answer).await {
        Ok(verdict) => Ok(verdict),
        Err(e) => {
            tracing::error!("Failed to grade answer: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            ))
        }
    }
}
