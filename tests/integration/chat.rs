//! Integration tests for chat

use super::*;
use hasab_client::{ChatRequest, FileInput};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::body_json;

#[tokio::test]
async fn test_complete_posts_json() {
    let server = setup_mock_server().await;

    mock_with_auth("POST", "chat")
        .and(body_json(json!({
            "message": "Hello",
            "model": "hasab-1-main",
            "temperature": 0.3
        })))
        .respond_with(success_response(json!({
            "success": true,
            "message": {"role": "assistant", "content": "ሰላም!"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .chat()
        .complete(
            ChatRequest::new("Hello")
                .model("hasab-1-main")
                .param("temperature", 0.3),
        )
        .await
        .unwrap();

    assert_eq!(response["message"]["content"], "ሰላም!");
}

#[tokio::test]
async fn test_complete_with_image_posts_multipart() {
    let server = setup_mock_server().await;

    mock_with_auth("POST", "chat")
        .respond_with(success_response(json!({"message": {"content": "A coffee cup"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .chat()
        .complete(
            ChatRequest::new("What is in this picture?").image(
                FileInput::bytes(b"\x89PNG-bytes".to_vec(), "buna.png")
                    .with_content_type("image/png"),
            ),
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = body_text(&requests[0]);
    assert!(body.contains("name=\"image\"; filename=\"buna.png\""));
    assert!(body.contains("Content-Type: image/png"));
    assert!(body.contains("name=\"message\"\r\n\r\nWhat is in this picture?"));
    assert!(body.contains("name=\"model\"\r\n\r\nhasab-1-lite"));
}

#[tokio::test]
async fn test_conversation_management() {
    let server = setup_mock_server().await;

    mock_with_auth("GET", "chat/history")
        .respond_with(success_response(json!({"history": []})))
        .expect(1)
        .mount(&server)
        .await;
    mock_with_auth("POST", "chat/clear")
        .and(body_json(json!({})))
        .respond_with(success_response(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    mock_with_auth("GET", "chat/title")
        .respond_with(success_response(json!({"title": "New chat"})))
        .expect(1)
        .mount(&server)
        .await;
    mock_with_auth("POST", "chat/title")
        .and(body_json(json!({"title": "Coffee ceremony"})))
        .respond_with(success_response(json!({"title": "Coffee ceremony"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let chat = client.chat();

    chat.history().await.unwrap();
    chat.clear().await.unwrap();
    assert_eq!(chat.title().await.unwrap()["title"], "New chat");
    assert_eq!(
        chat.update_title("Coffee ceremony").await.unwrap()["title"],
        "Coffee ceremony"
    );
}
