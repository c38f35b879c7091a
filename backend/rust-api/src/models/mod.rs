pub mod quiz;

pub use quiz::{DebugInfo, ErrorDebugInfo, QuestionResponse, SubmitAnswerRequest, TestResponse};
