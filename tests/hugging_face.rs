use httpmock::prelude::*;
use lifetea::{
    Emotion, EmotionClassifier, HuggingFaceModel, RetryModel, RetryPolicy, SentimentError,
    SentimentModel,
};
use serde_json::json;
use std::time::Duration;

const STORY: &str = "My sister called to say she is coming home for the holidays.";

fn model(server: &MockServer, token: Option<&str>, timeout: Duration) -> HuggingFaceModel {
    HuggingFaceModel::new(server.url("/model"), token.map(String::from), timeout).unwrap()
}

#[tokio::test]
async fn posts_inputs_and_reads_nested_scores() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/model")
                .header("authorization", "Bearer hf_test")
                .json_body(json!({ "inputs": STORY }));
            then.status(200).json_body(json!([[
                {"label": "surprise", "score": 0.2},
                {"label": "joy", "score": 0.7},
                {"label": "neutral", "score": 0.1}
            ]]));
        })
        .await;

    let classifier =
        EmotionClassifier::new(model(&server, Some("hf_test"), Duration::from_secs(5)));
    assert_eq!(classifier.classify(STORY).await, Emotion::Happy);
    mock.assert_async().await;
}

#[tokio::test]
async fn server_error_is_neutral() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/model");
            then.status(503)
                .json_body(json!({"error": "Model is currently loading"}));
        })
        .await;

    let m = model(&server, None, Duration::from_secs(5));
    assert!(matches!(m.score(STORY).await, Err(SentimentError::Status(503))));
    assert_eq!(EmotionClassifier::new(m).classify(STORY).await, Emotion::Neutral);
}

#[tokio::test]
async fn malformed_body_is_neutral() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/model");
            then.status(200).body("<html>oops</html>");
        })
        .await;

    let m = model(&server, None, Duration::from_secs(5));
    assert!(matches!(m.score(STORY).await, Err(SentimentError::Malformed(_))));
    assert_eq!(EmotionClassifier::new(m).classify(STORY).await, Emotion::Neutral);
}

#[tokio::test]
async fn empty_result_is_neutral() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/model");
            then.status(200).json_body(json!([]));
        })
        .await;

    let m = model(&server, None, Duration::from_secs(5));
    assert!(matches!(m.score(STORY).await, Err(SentimentError::Empty)));
    assert_eq!(EmotionClassifier::new(m).classify(STORY).await, Emotion::Neutral);
}

#[tokio::test]
async fn slow_endpoint_times_out_to_neutral() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/model");
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(json!([[{"label": "joy", "score": 1.0}]]));
        })
        .await;

    let classifier = EmotionClassifier::new(model(&server, None, Duration::from_millis(50)));
    assert_eq!(classifier.classify(STORY).await, Emotion::Neutral);
}

#[tokio::test]
async fn short_text_never_reaches_endpoint() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/model");
            then.status(200).json_body(json!([[{"label": "joy", "score": 1.0}]]));
        })
        .await;

    let classifier = EmotionClassifier::new(model(&server, None, Duration::from_secs(5)));
    assert_eq!(classifier.classify("so tired").await, Emotion::Neutral);
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn retry_policy_repeats_failed_requests() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/model");
            then.status(503);
        })
        .await;

    let retrying = RetryModel::new(
        model(&server, None, Duration::from_secs(5)),
        RetryPolicy::new(2, Duration::from_millis(1)),
    );
    assert_eq!(EmotionClassifier::new(retrying).classify(STORY).await, Emotion::Neutral);
    assert_eq!(mock.hits_async().await, 3);
}
