use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire format of `GET /api/question`. Field names stay camelCase inside
/// `debug` so existing clients keep parsing.
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub question: String,
    pub answer: String,
    pub debug: DebugInfo,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    pub timestamp: DateTime<Utc>,
    pub api_call_successful: bool,
    pub response_format: String,
}

impl DebugInfo {
    pub fn success() -> Self {
        Self {
            timestamp: Utc::now(),
            api_call_successful: true,
            response_format: "question\nanswer".to_string(),
        }
    }
}

/// Debug payload attached to oracle-call failures on the question endpoint.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDebugInfo {
    pub timestamp: DateTime<Utc>,
    pub api_call_successful: bool,
    pub error_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,
}

impl ErrorDebugInfo {
    pub fn new(error_type: impl Into<String>, error_details: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            api_call_successful: false,
            error_type: error_type.into(),
            error_details,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TestResponse {
    pub message: String,
    #[serde(rename = "openaiResponse")]
    pub openai_response: String,
}
