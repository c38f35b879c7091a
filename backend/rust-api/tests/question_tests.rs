mod common;

use axum::body::to_bytes;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use httpmock::prelude::*;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_two_line_reply_becomes_question_and_answer() {
    let oracle = MockServer::start_async().await;
    let mock = oracle
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .json_body(common::chat_completion("What is 7 - 3?\n4"));
        })
        .await;

    let app = common::create_test_app(&oracle).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/question")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["question"], "What is 7 - 3?");
    assert_eq!(json["answer"], "4");
    assert_eq!(json["debug"]["apiCallSuccessful"], true);
    assert_eq!(json["debug"]["responseFormat"], "question\nanswer");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_question_lines_are_trimmed() {
    let oracle = MockServer::start_async().await;
    oracle
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .json_body(common::chat_completion("  What is 9 - 5?  \n  4  "));
        })
        .await;

    let app = common::create_test_app(&oracle).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/question")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["question"], "What is 9 - 5?");
    assert_eq!(json["answer"], "4");
}

#[tokio::test]
async fn test_chatty_reply_is_rejected_with_fixed_message() {
    let oracle = MockServer::start_async().await;
    oracle
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(common::chat_completion(
                "Sure! Here is a problem:\nWhat is 7 - 3?\n4",
            ));
        })
        .await;

    let app = common::create_test_app(&oracle).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/question")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"], "Invalid response format from OpenAI");
    // The format error carries no debug payload.
    assert!(json.get("debug").is_none());
}

#[tokio::test]
async fn test_single_line_reply_is_rejected() {
    let oracle = MockServer::start_async().await;
    oracle
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .json_body(common::chat_completion("What is 7 - 3? The answer is 4."));
        })
        .await;

    let app = common::create_test_app(&oracle).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/question")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"], "Invalid response format from OpenAI");
}

#[tokio::test]
async fn test_generation_request_parameters() {
    let oracle = MockServer::start_async().await;
    let mock = oracle
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .json_body_includes(
                    r#"{"model": "gpt-3.5-turbo", "temperature": 0.7, "max_tokens": 100}"#,
                )
                .body_includes("subtraction problem using numbers between 1 and 10");
            then.status(200)
                .json_body(common::chat_completion("What is 8 - 2?\n6"));
        })
        .await;

    let app = common::create_test_app(&oracle).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/question")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_oracle_failure_maps_to_500_with_debug() {
    let oracle = MockServer::start_async().await;
    oracle
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(401)
                .json_body(json!({ "error": { "message": "Incorrect API key provided" } }));
        })
        .await;

    let app = common::create_test_app(&oracle).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/question")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"], "OpenAI API returned status 401 Unauthorized");
    assert_eq!(json["debug"]["apiCallSuccessful"], false);
    assert_eq!(json["debug"]["errorType"], "ApiError");
    assert!(json["debug"]["errorDetails"]
        .as_str()
        .unwrap()
        .contains("Incorrect API key provided"));
}
