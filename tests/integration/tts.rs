//! Integration tests for text-to-speech

use super::*;
use hasab_client::BinaryEnvelope;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, query_param};

#[tokio::test]
async fn test_synthesize_returns_json_unchanged() {
    let server = setup_mock_server().await;

    let reply = json!({
        "success": true,
        "message": "Speech synthesized",
        "audio_url": "https://cdn.hasab.co/tts/1.wav",
        "record": {"id": 1, "tokens_used": 5}
    });

    mock_with_auth("POST", "tts/synthesize")
        .and(body_json(json!({
            "text": "Hello",
            "language": "eng",
            "speaker_name": "default"
        })))
        .respond_with(success_response(reply.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .tts()
        .synthesize("Hello", "eng", Some("default"))
        .await
        .unwrap();

    assert_eq!(response, reply);
}

#[tokio::test]
async fn test_synthesize_audio_becomes_envelope() {
    let server = setup_mock_server().await;
    let audio = vec![0x49, 0x44, 0x33, 0x04, 0x00, 0xff];

    mock_with_auth("POST", "tts/synthesize")
        .respond_with(ResponseTemplate::new(200).set_body_raw(audio.clone(), "audio/mpeg"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client.tts().synthesize("ሰላም", "amh", None).await.unwrap();

    assert_eq!(response["content_type"], "audio/mpeg");
    assert_eq!(response["size"], 6);

    let envelope = BinaryEnvelope::from_response(&response).unwrap();
    assert_eq!(envelope.bytes().unwrap(), audio);
    assert_eq!(
        envelope.headers.get("content-type").map(String::as_str),
        Some("audio/mpeg")
    );
}

#[tokio::test]
async fn test_speakers_history_delete() {
    let server = setup_mock_server().await;

    mock_with_auth("GET", "tts/speakers")
        .and(query_param("language", "amh"))
        .respond_with(success_response(json!({"languages": {"amh": ["hanna"]}})))
        .expect(1)
        .mount(&server)
        .await;
    mock_with_auth("GET", "tts/history")
        .respond_with(success_response(json!({"records": []})))
        .expect(1)
        .mount(&server)
        .await;
    mock_with_auth("DELETE", "tts/record/12")
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let speakers = client.tts().speakers(Some("amh")).await.unwrap();
    assert_eq!(speakers["languages"]["amh"][0], "hanna");
    client.tts().history().await.unwrap();
    assert!(client.tts().delete(12).await.unwrap().is_null());
}

#[tokio::test]
async fn test_speakers_without_language_has_no_query() {
    let server = setup_mock_server().await;

    mock_with_auth("GET", "tts/speakers")
        .respond_with(success_response(json!({"languages": {}})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.tts().speakers(None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}
