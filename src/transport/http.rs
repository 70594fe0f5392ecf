//! HTTP transport implementation.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, ClientBuilder, RequestBuilder};
use std::collections::HashMap;
use std::time::Duration;
use tracing::instrument;

use super::{MultipartPart, MultipartRequest, TransportError};

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET request.
    Get,
    /// POST request.
    Post,
    /// DELETE request.
    Delete,
}

/// HTTP request representation.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request path, relative to the API base.
    pub path: String,
    /// Query string parameters.
    pub query: Vec<(String, String)>,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Creates a new GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a new POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Creates a new DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Sets the request body.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Appends a query parameter.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }
}

/// HTTP response representation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Returns true if the status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Looks up a header case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP transport trait.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send an HTTP request.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;

    /// Send a multipart form request.
    async fn send_multipart(
        &self,
        request: MultipartRequest,
    ) -> Result<HttpResponse, TransportError>;
}

/// HTTP transport implementation using reqwest.
pub struct HttpTransportImpl {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransportImpl {
    /// Creates a new HTTP transport rooted at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .tcp_keepalive(Duration::from_secs(60))
            .build()
            .map_err(|e| TransportError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Builds the full URL for a path.
    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn execute(
        &self,
        mut req_builder: RequestBuilder,
        headers: &HashMap<String, String>,
    ) -> Result<HttpResponse, TransportError> {
        for (name, value) in headers {
            req_builder = req_builder.header(name, value);
        }

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout {
                    timeout: self.timeout,
                }
            } else if e.is_connect() {
                TransportError::Connection {
                    message: e.to_string(),
                }
            } else if e.is_builder() {
                TransportError::InvalidRequest {
                    message: e.to_string(),
                }
            } else {
                TransportError::InvalidResponse {
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::InvalidResponse {
                message: e.to_string(),
            })?
            .to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[async_trait]
impl HttpTransport for HttpTransportImpl {
    #[instrument(skip(self, request), fields(method = ?request.method, path = %request.path))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self.build_url(&request.path);

        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        self.execute(req_builder, &request.headers)
            .await
    }

    #[instrument(skip(self, request), fields(path = %request.path, parts = request.parts.len()))]
    async fn send_multipart(
        &self,
        request: MultipartRequest,
    ) -> Result<HttpResponse, TransportError> {
        let url = self.build_url(&request.path);

        let mut form = reqwest::multipart::Form::new();

        for part in request.parts {
            form = match part {
                MultipartPart::Text { name, value } => form.text(name, value),
                MultipartPart::File {
                    name,
                    filename,
                    content_type,
                    data,
                } => {
                    let mut part = reqwest::multipart::Part::bytes(data).file_name(filename);
                    if let Some(content_type) = content_type {
                        part = part.mime_str(&content_type).map_err(|e| {
                            TransportError::InvalidRequest {
                                message: e.to_string(),
                            }
                        })?;
                    }
                    form.part(name, part)
                }
            };
        }

        let req_builder = self.client.post(&url).multipart(form);

        self.execute(req_builder, &request.headers)
            .await
    }
}

/// Flattens response headers into one value per name.
///
/// Repeated headers (e.g. `set-cookie`) are joined with `", "` in arrival
/// order. Bytes that are not UTF-8 are replaced rather than dropped.
fn collect_headers(headers: &HeaderMap) -> HashMap<String, String> {
    let mut collected: HashMap<String, String> = HashMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        collected
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }
    collected
}

impl std::fmt::Debug for HttpTransportImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransportImpl")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
