use thiserror::Error;

use super::oracle::{ChatMessage, OracleClient, OracleError};

/// The two-line reply contract in the user prompt is what `parse_reply`
/// depends on.
pub const QUESTION_SYSTEM_PROMPT: &str = "You are a friendly and patient math tutor helping a 6-year-old child learn subtraction. Keep the tone encouraging and age-appropriate.";

pub const QUESTION_USER_PROMPT: &str = "Generate one subtraction problem using numbers between 1 and 10.\n\n\u{1F4CC} Respond in this exact format:\nLine 1: The question\nLine 2: The correct answer\n\n\u{270F}\u{FE0F} Example:\nWhat is 7 - 3?\n4";

const QUESTION_TEMPERATURE: f32 = 0.7;
const QUESTION_MAX_TOKENS: u32 = 100;

#[derive(Debug, Error)]
pub enum QuestionError {
    /// The oracle ignored the two-line contract. Not retried; the caller
    /// must request a fresh question.
    #[error("Invalid response format from OpenAI")]
    InvalidFormat { lines: usize },
    #[error(transparent)]
    Oracle(#[from] OracleError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedQuestion {
    pub question: String,
    pub answer: String,
}

pub struct QuestionService {
    oracle: OracleClient,
}

impl QuestionService {
    pub fn new(oracle: OracleClient) -> Self {
        Self { oracle }
    }

    pub async fn generate(&self) -> Result<GeneratedQuestion, QuestionError> {
        tracing::info!("Requesting a new subtraction question from the oracle");

        let messages = [
            ChatMessage::system(QUESTION_SYSTEM_PROMPT),
            ChatMessage::user(QUESTION_USER_PROMPT),
        ];

        let reply = self
            .oracle
            .complete(&messages, QUESTION_TEMPERATURE, Some(QUESTION_MAX_TOKENS))
            .await?;

        let generated = parse_reply(&reply)?;

        tracing::info!("Question generated: {}", generated.question);

        Ok(generated)
    }
}

/// Line count is checked on the raw split; trimming happens after, so a
/// trailing newline in the reply counts as a third line and is rejected.
fn parse_reply(reply: &str) -> Result<GeneratedQuestion, QuestionError> {
    let lines: Vec<&str> = reply.split('\n').collect();

    if lines.len() != 2 {
        tracing::warn!(
            "Oracle reply had {} lines instead of 2: {:?}",
            lines.len(),
            reply
        );
        return Err(QuestionError::InvalidFormat { lines: lines.len() });
    }

    Ok(GeneratedQuestion {
        question: lines[0].trim().to_string(),
        answer: lines[1].trim().to_string(),
    })
}
