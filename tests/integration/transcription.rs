//! Integration tests for transcription

use super::*;
use hasab_client::{HasabError, TranscriptionOptions};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use wiremock::matchers::{body_partial_json, query_param};

#[tokio::test]
async fn test_upload_url_posts_json() {
    let server = setup_mock_server().await;

    mock_with_auth("POST", "upload-audio")
        .and(body_partial_json(json!({
            "url": "https://x/a.mp3",
            "is_meeting": false,
            "transcribe": true,
            "translate": false,
            "summarize": false,
            "language": "auto",
            "timestamps": false
        })))
        .respond_with(success_response(json!({
            "success": true,
            "transcription": "Hello world",
            "audio": {"id": 8769}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .transcription()
        .upload(TranscriptionOptions::new().url("https://x/a.mp3"))
        .await
        .unwrap();

    assert_eq!(response["audio"]["id"], 8769);
}

#[tokio::test]
async fn test_upload_file_posts_multipart() {
    let server = setup_mock_server().await;

    mock_with_auth("POST", "upload-audio")
        .respond_with(success_response(json!({"transcription": "ሰላም"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut file = tempfile::Builder::new()
        .prefix("meeting")
        .suffix(".mp3")
        .tempfile()
        .unwrap();
    file.write_all(b"ID3-fake-audio-bytes").unwrap();

    let client = client_for(&server);
    client
        .transcription()
        .upload(
            TranscriptionOptions::new()
                .file(file.path())
                .key("q1-review")
                .is_meeting(true)
                .source_language("amh"),
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));

    let body = body_text(&requests[0]);
    assert!(body.contains("ID3-fake-audio-bytes"));
    assert!(body.contains("name=\"file\"; filename=\"meeting"));
    assert!(body.contains("name=\"key\"\r\n\r\nq1-review"));
    assert!(body.contains("name=\"is_meeting\"\r\n\r\ntrue"));
    assert!(body.contains("name=\"language\"\r\n\r\nauto"));
    assert!(body.contains("name=\"source_language\"\r\n\r\namh"));
}

#[tokio::test]
async fn test_upload_missing_file_sends_nothing() {
    let server = setup_mock_server().await;
    let client = client_for(&server);

    let err = client
        .transcription()
        .upload(TranscriptionOptions::new().file("/definitely/missing.wav"))
        .await
        .unwrap_err();

    assert!(matches!(err, HasabError::InvalidInput { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_history_get_delete() {
    let server = setup_mock_server().await;

    mock_with_auth("GET", "audios")
        .and(query_param("page", "3"))
        .respond_with(success_response(json!({"data": {"current_page": 3, "data": []}})))
        .expect(1)
        .mount(&server)
        .await;
    mock_with_auth("GET", "audios/42")
        .respond_with(success_response(json!({"id": 42})))
        .expect(1)
        .mount(&server)
        .await;
    mock_with_auth("DELETE", "audios/42")
        .respond_with(success_response(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let service = client.transcription();

    assert_eq!(service.history(3).await.unwrap()["data"]["current_page"], 3);
    assert_eq!(service.get(42).await.unwrap()["id"], 42);
    assert_eq!(service.delete(42).await.unwrap()["success"], true);
}
