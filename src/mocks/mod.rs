//! Mock implementations for testing.
//!
//! Provides a recording mock transport and a mock auth provider so services
//! can be exercised without making real API calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::auth::AuthProvider;
use crate::errors::HasabError;
use crate::observability::DefaultMetricsCollector;
use crate::transport::{
    ApiTransport, HttpMethod, HttpRequest, HttpResponse, HttpTransport, MultipartPart,
    MultipartRequest, TransportError,
};

/// Mock HTTP transport for testing.
pub struct MockTransport {
    responses: Mutex<Vec<MockResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
    default_response: Mutex<Option<MockResponse>>,
}

/// A recorded request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request path.
    pub path: String,
    /// Query string parameters.
    pub query: Vec<(String, String)>,
    /// Request body (JSON requests).
    pub body: Option<Vec<u8>>,
    /// Multipart parts (multipart requests).
    pub parts: Option<Vec<MultipartPart>>,
    /// Request headers.
    pub headers: HashMap<String, String>,
}

impl RecordedRequest {
    /// Parses the body as JSON.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_ref()
            .and_then(|body| serde_json::from_slice(body).ok())
    }

    /// Returns true if this was a multipart request.
    pub fn is_multipart(&self) -> bool {
        self.parts.is_some()
    }

    /// Returns the value of a text part.
    pub fn text_field(&self, name: &str) -> Option<&str> {
        self.parts.as_ref()?.iter().find_map(|part| match part {
            MultipartPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// Returns a file part.
    pub fn file_part(&self, name: &str) -> Option<&MultipartPart> {
        self.parts
            .as_ref()?
            .iter()
            .find(|part| matches!(part, MultipartPart::File { name: n, .. } if n == name))
    }

    /// Returns the names of all parts, in order.
    pub fn part_names(&self) -> Vec<&str> {
        self.parts
            .as_ref()
            .map(|parts| parts.iter().map(MultipartPart::name).collect())
            .unwrap_or_default()
    }

    /// Looks up a header case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A mock response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl MockResponse {
    /// Creates a successful JSON response.
    pub fn json<T: serde::Serialize>(value: &T) -> Self {
        let body = serde_json::to_vec(value).unwrap_or_default();
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        Self {
            status: 200,
            headers,
            body,
        }
    }

    /// Creates an error response shaped like the service's validation errors.
    pub fn error(status: u16, message: &str) -> Self {
        let error = serde_json::json!({
            "message": message,
            "status": "error"
        });

        Self::json(&error).with_status(status)
    }

    /// Creates a successful binary response.
    pub fn binary(content_type: &str, body: Vec<u8>) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), content_type.to_string());

        Self {
            status: 200,
            headers,
            body,
        }
    }

    /// Creates a response with custom status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Adds a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
            default_response: Mutex::new(None),
        }
    }

    /// Queues a response.
    pub fn queue(&self, response: MockResponse) {
        lock(&self.responses).push(response);
    }

    /// Queues a JSON response.
    pub fn queue_json<T: serde::Serialize>(&self, value: &T) {
        self.queue(MockResponse::json(value));
    }

    /// Queues an error response.
    pub fn queue_error(&self, status: u16, message: &str) {
        self.queue(MockResponse::error(status, message));
    }

    /// Sets the default response.
    pub fn set_default(&self, response: MockResponse) {
        *lock(&self.default_response) = Some(response);
    }

    /// Gets all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Gets the last recorded request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Clears recorded requests.
    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    fn get_response(&self) -> MockResponse {
        let mut responses = lock(&self.responses);
        if !responses.is_empty() {
            responses.remove(0)
        } else {
            lock(&self.default_response)
                .clone()
                .unwrap_or_else(|| MockResponse::error(500, "No mock response configured"))
        }
    }

    fn respond(&self, recorded: RecordedRequest) -> HttpResponse {
        lock(&self.requests).push(recorded);

        let response = self.get_response();
        HttpResponse {
            status: response.status,
            headers: response.headers,
            body: response.body,
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Ok(self.respond(RecordedRequest {
            method: request.method,
            path: request.path,
            query: request.query,
            body: request.body,
            parts: None,
            headers: request.headers,
        }))
    }

    async fn send_multipart(
        &self,
        request: MultipartRequest,
    ) -> Result<HttpResponse, TransportError> {
        Ok(self.respond(RecordedRequest {
            method: HttpMethod::Post,
            path: request.path,
            query: Vec::new(),
            body: None,
            parts: Some(request.parts),
            headers: request.headers,
        }))
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("request_count", &self.request_count())
            .finish()
    }
}

/// Mock auth provider for testing.
pub struct MockAuth {
    api_key: String,
}

impl MockAuth {
    /// Creates a new mock auth provider.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

impl Default for MockAuth {
    fn default() -> Self {
        Self::new("hsb_mock_test_key")
    }
}

impl AuthProvider for MockAuth {
    fn apply_auth(&self, headers: &mut HashMap<String, String>) {
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.api_key),
        );
    }

    fn scheme(&self) -> &str {
        "Bearer"
    }

    fn validate(&self) -> Result<(), HasabError> {
        Ok(())
    }
}

impl std::fmt::Debug for MockAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockAuth").finish()
    }
}

/// Wraps a mock transport in an [`ApiTransport`] with mock auth.
pub fn api_transport(transport: &Arc<MockTransport>) -> Arc<ApiTransport> {
    let transport: Arc<dyn HttpTransport> = Arc::clone(transport) as Arc<dyn HttpTransport>;
    Arc::new(ApiTransport::new(
        transport,
        Arc::new(MockAuth::default()),
        Arc::new(DefaultMetricsCollector::new()),
    ))
}
