//! Integration tests for error handling

use super::*;
use hasab_client::{
    ChatRequest, FileInput, HasabClient, HasabError, TranscriptionOptions, TranslationOptions,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use std::time::Duration;
use wiremock::matchers::any;

async fn not_found_server() -> MockServer {
    let server = setup_mock_server().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not found",
            "status": "error"
        })))
        .mount(&server)
        .await;
    server
}

fn assert_not_found(result: hasab_client::HasabResult<serde_json::Value>) {
    match result {
        Err(HasabError::Http { status, body }) => {
            assert_eq!(status, 404);
            assert!(body.contains("Not found"));
        }
        other => panic!("expected 404, got {:?}", other),
    }
}

#[tokio::test]
async fn test_not_found_is_raised_once_per_operation() {
    let server = not_found_server().await;
    let client = client_for(&server);

    let mut audio = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
    audio.write_all(b"RIFF-fake-wave").unwrap();

    assert_not_found(
        client
            .transcription()
            .upload(TranscriptionOptions::new().file(audio.path()))
            .await,
    );
    assert_not_found(
        client
            .transcription()
            .upload(TranscriptionOptions::new().url("https://x/a.mp3"))
            .await,
    );
    assert_not_found(client.transcription().history(1).await);
    assert_not_found(client.transcription().get(1).await);
    assert_not_found(client.transcription().delete(1).await);
    assert_not_found(
        client
            .translation()
            .translate(
                TranslationOptions::new()
                    .text("Hello")
                    .source_language("eng")
                    .target_language("amh"),
            )
            .await,
    );
    assert_not_found(
        client
            .translation()
            .upload(TranscriptionOptions::new().url("https://x/a.mp3"))
            .await,
    );
    assert_not_found(client.translation().history(1).await);
    assert_not_found(client.tts().synthesize("Hello", "eng", None).await);
    assert_not_found(client.tts().speakers(None).await);
    assert_not_found(client.tts().history().await);
    assert_not_found(client.tts().delete(1).await);
    assert_not_found(client.chat().complete(ChatRequest::new("Hello")).await);
    assert_not_found(
        client
            .chat()
            .complete(ChatRequest::new("What is this?").image(FileInput::bytes(vec![1, 2, 3], "a.png")))
            .await,
    );
    assert_not_found(client.chat().history().await);
    assert_not_found(client.chat().clear().await);
    assert_not_found(client.chat().title().await);
    assert_not_found(client.chat().update_title("x").await);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 18);
}

#[tokio::test]
async fn test_html_error_body_is_kept_raw() {
    let server = setup_mock_server().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(502).set_body_raw("<h1>Bad Gateway</h1>", "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.chat().history().await.unwrap_err();

    assert!(err.is_server_error());
    match err {
        HasabError::Http { body, .. } => assert_eq!(body, "<h1>Bad Gateway</h1>"),
        other => panic!("expected Http error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout() {
    let server = setup_mock_server().await;

    Mock::given(any())
        .respond_with(success_response(json!({})).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let client = HasabClient::builder()
        .base_url(server.uri())
        .api_key(TEST_API_KEY)
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();

    let err = client.tts().history().await.unwrap_err();
    assert!(matches!(err, HasabError::Timeout { .. }));
}

#[tokio::test]
async fn test_no_version_uses_base_url() {
    let server = setup_mock_server().await;

    Mock::given(wiremock::matchers::path("/chat/history"))
        .respond_with(success_response(json!({"history": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HasabClient::builder()
        .base_url(server.uri())
        .api_key(TEST_API_KEY)
        .no_version()
        .build()
        .unwrap();

    client.chat().history().await.unwrap();
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let client = HasabClient::builder()
        .base_url("http://127.0.0.1:9")
        .api_key(TEST_API_KEY)
        .build()
        .unwrap();

    let err = client.chat().title().await.unwrap_err();
    assert!(matches!(
        err,
        HasabError::Network { .. } | HasabError::Timeout { .. }
    ));
}
