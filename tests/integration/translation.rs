//! Integration tests for translation

use super::*;
use hasab_client::TranslationOptions;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::query_param;

#[tokio::test]
async fn test_translate_sends_form_parts() {
    let server = setup_mock_server().await;

    mock_with_auth("POST", "translate")
        .respond_with(success_response(json!({
            "status": "success",
            "data": {"translation": ["ሰላም"]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .translation()
        .translate(
            TranslationOptions::new()
                .text("Hello")
                .source_language("eng")
                .target_language("amh"),
        )
        .await
        .unwrap();

    assert_eq!(response["data"]["translation"][0], "ሰላም");

    let requests = server.received_requests().await.unwrap();
    let body = body_text(&requests[0]);
    assert!(body.contains("name=\"text\"\r\n\r\n[\"Hello\"]"));
    assert!(body.contains("name=\"source_language\"\r\n\r\neng"));
    assert!(body.contains("name=\"target_language\"\r\n\r\namh"));
    assert!(!body.contains("filename="));
}

#[tokio::test]
async fn test_translate_missing_target_sends_nothing() {
    let server = setup_mock_server().await;
    let client = client_for(&server);

    let err = client
        .translation()
        .translate(TranslationOptions::new().text("Hello").source_language("eng"))
        .await
        .unwrap_err();

    assert!(err.is_invalid_input());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_history_defaults_to_first_page() {
    let server = setup_mock_server().await;

    mock_with_auth("GET", "translations")
        .and(query_param("page", "1"))
        .respond_with(success_response(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.translation().history(1).await.unwrap();
}
