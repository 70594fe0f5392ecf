//! Integration tests using WireMock
//!
//! These tests drive the real reqwest transport against a mock HTTP server,
//! covering authentication, URL layout, body encoding and error handling.

mod chat;
mod errors;
mod transcription;
mod translation;
mod tts;

use hasab_client::HasabClient;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "test-api-key";

/// Helper to create a mock server
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Helper to build a client pointing at the mock server
pub fn client_for(server: &MockServer) -> HasabClient {
    HasabClient::builder()
        .base_url(server.uri())
        .api_key(TEST_API_KEY)
        .build()
        .expect("Failed to build client")
}

/// Helper to create an authenticated mock under the `v1` prefix
pub fn mock_with_auth(method_matcher: &str, endpoint: &str) -> wiremock::MockBuilder {
    Mock::given(method(method_matcher))
        .and(path(format!("/v1/{}", endpoint)))
        .and(header("Authorization", "Bearer test-api-key"))
}

/// Helper to create success response templates
pub fn success_response(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

/// Returns the body of a received request as text
pub fn body_text(request: &wiremock::Request) -> String {
    String::from_utf8_lossy(&request.body).into_owned()
}
