use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::metrics::ORACLE_REQUESTS_TOTAL;

const ORACLE_REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: String,
}

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,
    #[error("failed to call OpenAI API: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("OpenAI API returned status {status}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("OpenAI response contained no choices")]
    EmptyResponse,
}

impl OracleError {
    /// Short machine-readable name, surfaced as `errorType` in debug payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            OracleError::MissingApiKey => "MissingApiKey",
            OracleError::Transport(_) => "TransportError",
            OracleError::Api { .. } => "ApiError",
            OracleError::EmptyResponse => "EmptyResponse",
        }
    }

    /// Raw upstream body for API-level failures, surfaced as `details`/`errorDetails`.
    pub fn details(&self) -> Option<&str> {
        match self {
            OracleError::Api { body, .. } if !body.is_empty() => Some(body),
            _ => None,
        }
    }
}

/// Thin chat-completions client. One request per call, no retries, no backoff;
/// callers own the failure handling.
#[derive(Clone)]
pub struct OracleClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl OracleClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(ORACLE_REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            model: config.openai_model.clone(),
            api_key: config.openai_api_key.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: Option<u32>,
    ) -> Result<String, OracleError> {
        let result = self.complete_inner(messages, temperature, max_tokens).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        ORACLE_REQUESTS_TOTAL.with_label_values(&[outcome]).inc();

        result
    }

    async fn complete_inner(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: Option<u32>,
    ) -> Result<String, OracleError> {
        let api_key = self.api_key.as_deref().ok_or(OracleError::MissingApiKey)?;

        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatCompletionRequest {
            model: &self.model,
            temperature,
            max_tokens,
            messages,
        };

        tracing::debug!(
            "Calling oracle: model={}, temperature={}, messages={}",
            self.model,
            temperature,
            messages.len()
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Oracle returned status {}: {}", status, body);
            return Err(OracleError::Api { status, body });
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(OracleError::EmptyResponse)?;

        tracing::debug!("Oracle reply received ({} bytes)", content.len());

        Ok(content)
    }
}
