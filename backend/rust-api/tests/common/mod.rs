#![allow(dead_code)]

use axum::Router;
use httpmock::MockServer;
use serde_json::json;
use std::sync::Arc;

use kanga_api::{config::Config, create_router, services::AppState};

/// Builds the real router against a mock oracle server.
pub async fn create_test_app(oracle: &MockServer) -> Router {
    build_app(test_config(Some("test-key".to_string()), oracle.base_url()))
}

/// App with no API key configured; every oracle call must fail.
pub async fn create_unconfigured_test_app() -> Router {
    build_app(test_config(None, "http://127.0.0.1:9".to_string()))
}

fn build_app(config: Config) -> Router {
    // Initialize tracing for tests
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let app_state = Arc::new(AppState::new(config).expect("Failed to initialize test app state"));

    create_router(app_state)
}

fn test_config(openai_api_key: Option<String>, openai_base_url: String) -> Config {
    Config {
        openai_api_key,
        openai_base_url,
        openai_model: "gpt-3.5-turbo".to_string(),
        port: 0,
    }
}

/// Minimal chat-completions reply wrapping the given assistant text.
pub fn chat_completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
}
