//! Chat service.

use std::sync::Arc;
use tracing::instrument;

use crate::errors::HasabResult;
use crate::transport::ApiTransport;
use crate::types::chat::{ChatRequest, DEFAULT_CHAT_MODEL};
use crate::types::file::FormValue;
use crate::types::response::ApiResponse;

/// Chat service.
pub struct ChatService {
    http: Arc<ApiTransport>,
}

impl ChatService {
    /// Creates a new chat service.
    pub fn new(http: Arc<ApiTransport>) -> Self {
        Self { http }
    }

    /// Sends a chat message.
    ///
    /// Requests with an image go out as multipart form data carrying only the
    /// image, `message` and `model`. All others are sent as JSON.
    #[instrument(skip(self, request), fields(has_image = request.image.is_some()))]
    pub async fn complete(&self, request: ChatRequest) -> HasabResult<ApiResponse> {
        let ChatRequest {
            message,
            model,
            image,
            extra,
        } = request;

        match image {
            Some(image) => {
                if !extra.is_empty() {
                    tracing::debug!(
                        params = ?extra.keys().collect::<Vec<_>>(),
                        "Extra chat parameters are not sent with image uploads"
                    );
                }

                let fields = vec![
                    ("message", Some(FormValue::from(message.unwrap_or_default()))),
                    (
                        "model",
                        Some(FormValue::from(
                            model.unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
                        )),
                    ),
                ];
                self.http
                    .post_multipart("chat", vec![("image", image)], fields)
                    .await
            }
            None => {
                let body = ChatRequest {
                    message,
                    model,
                    image: None,
                    extra,
                };
                self.http.post("chat", &body).await
            }
        }
    }

    /// Returns the conversation history.
    #[instrument(skip(self))]
    pub async fn history(&self) -> HasabResult<ApiResponse> {
        self.http.get("chat/history", &[]).await
    }

    /// Clears the conversation.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> HasabResult<ApiResponse> {
        self.http
            .post("chat/clear", &serde_json::Map::new())
            .await
    }

    /// Returns the conversation title.
    #[instrument(skip(self))]
    pub async fn title(&self) -> HasabResult<ApiResponse> {
        self.http.get("chat/title", &[]).await
    }

    /// Renames the conversation.
    #[instrument(skip(self))]
    pub async fn update_title(&self, title: &str) -> HasabResult<ApiResponse> {
        self.http
            .post("chat/title", &serde_json::json!({ "title": title }))
            .await
    }
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService").finish()
    }
}
