use super::oracle::{ChatMessage, OracleClient, OracleError};

/// The oracle computes the correct answer itself; the relay never does the
/// arithmetic and forwards whatever word comes back. The oracle is
/// authoritative here, even when its verdict is wrong.
pub const GRADING_SYSTEM_PROMPT: &str = "You are a math tutor. Please calculate the answer to the question first. Determine if the user answer to the math problem is correct or wrong based on your answer. Return only one word: Correct or Wrong. Do not explain or include any other text.";

const GRADING_TEMPERATURE: f32 = 0.0;

pub struct GradingService {
    oracle: OracleClient,
}

impl GradingService {
    pub fn new(oracle: OracleClient) -> Self {
        Self { oracle }
    }

    /// Returns the trimmed oracle reply verbatim. No validation that it is
    /// actually "Correct" or "Wrong".
    pub async fn grade(&self, question: &str, answer: &str) -> Result<String, OracleError> {
        tracing::info!("Grading answer: question={:?}, answer={:?}", question, answer);

        let messages = [
            ChatMessage::system(GRADING_SYSTEM_PROMPT),
            ChatMessage::user(build_user_message(question, answer)),
        ];

        let reply = self
            .oracle
            .complete(&messages, GRADING_TEMPERATURE, None)
            .await?;

        let verdict = reply.trim().to_string();

        tracing::info!("Grading verdict: {}", verdict);

        Ok(verdict)
    }
}

fn build_user_message(question: &str, answer: &str) -> String {
    format!("Question: {}\nUser's Answer: {}", question, answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_carries_question_and_answer() {
        assert_eq!(
            build_user_message("What is 7 - 3?", "4"),
            "Question: What is 7 - 3?\nUser's Answer: 4"
        );
    }
}
