//! Request execution shared by every service.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

use super::{HttpRequest, HttpResponse, HttpTransport, MultipartPart, MultipartRequest, TransportError};
use crate::auth::AuthProvider;
use crate::errors::{HasabError, HasabResult};
use crate::observability::{
    redact, truncate_body, CallRecord, MetricsCollector, DEFAULT_MAX_BODY_LENGTH,
};
use crate::types::file::{FileInput, FormValue};
use crate::types::response::{ApiResponse, BinaryEnvelope};

/// Issues authenticated calls and decodes their responses.
///
/// Every call is sent exactly once. A call either returns the decoded body
/// or fails; non-2xx statuses become [`HasabError::Http`].
pub struct ApiTransport {
    transport: Arc<dyn HttpTransport>,
    auth: Arc<dyn AuthProvider>,
    metrics: Arc<dyn MetricsCollector>,
    default_headers: Vec<(String, String)>,
    max_logged_body: usize,
}

impl ApiTransport {
    /// Creates a new executor.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        auth: Arc<dyn AuthProvider>,
        metrics: Arc<dyn MetricsCollector>,
    ) -> Self {
        Self {
            transport,
            auth,
            metrics,
            default_headers: Vec::new(),
            max_logged_body: DEFAULT_MAX_BODY_LENGTH,
        }
    }

    /// Adds headers sent with every request.
    ///
    /// Names are case-insensitive; a header named here replaces the default
    /// of the same name.
    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.default_headers = headers;
        self
    }

    /// Sets how many characters of an error body are logged.
    pub fn with_max_logged_body(mut self, max_len: usize) -> Self {
        self.max_logged_body = max_len;
        self
    }

    /// Characters of an error body included in log events.
    pub fn max_logged_body(&self) -> usize {
        self.max_logged_body
    }

    /// Assembles request headers keyed by lowercase name. Later sources win:
    /// defaults, then custom headers, then auth.
    fn headers(&self) -> HashMap<String, String> {
        let mut auth_headers = HashMap::new();
        self.auth.apply_auth(&mut auth_headers);

        std::iter::once(("accept".to_string(), "application/json".to_string()))
            .chain(self.default_headers.iter().cloned())
            .chain(auth_headers)
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect()
    }

    /// GET `path` with query-string parameters.
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> HasabResult<ApiResponse> {
        let mut request = HttpRequest::get(path);
        request.headers = self.headers();
        request.query = query
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();

        let started = Instant::now();
        let result = self.transport.send(request).await;
        self.finish("GET", path, started, 0, result)
    }

    /// POST `path` with a JSON body.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<T: Serialize + ?Sized + Sync>(
        &self,
        path: &str,
        body: &T,
    ) -> HasabResult<ApiResponse> {
        let body = serde_json::to_vec(body)?;
        let mut request = HttpRequest::post(path).with_body(body);
        request.headers = self.headers();
        request
            .headers
            .insert("content-type".to_string(), "application/json".to_string());

        let started = Instant::now();
        let result = self.transport.send(request).await;
        self.finish("POST", path, started, 0, result)
    }

    /// POST `path` as a multipart form.
    ///
    /// Each file becomes a file part. Each field becomes a text part, except
    /// fields whose value is `None`, which are left out entirely.
    #[instrument(skip(self, files, fields), fields(path = %path, files = files.len()))]
    pub async fn post_multipart(
        &self,
        path: &str,
        files: Vec<(&str, FileInput)>,
        fields: Vec<(&str, Option<FormValue>)>,
    ) -> HasabResult<ApiResponse> {
        let mut parts = Vec::with_capacity(files.len() + fields.len());
        let mut uploaded_bytes = 0u64;

        for (name, file) in files {
            let part = file.into_part(name).await?;
            if let MultipartPart::File { data, .. } = &part {
                uploaded_bytes += data.len() as u64;
            }
            parts.push(part);
        }

        let mut skipped = 0usize;
        for (name, value) in fields {
            match value {
                Some(value) => parts.push(MultipartPart::Text {
                    name: name.to_string(),
                    value: value.render(),
                }),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            tracing::debug!(skipped, "Omitted unset form fields");
        }

        let request = MultipartRequest {
            path: path.to_string(),
            headers: self.headers(),
            parts,
        };

        let started = Instant::now();
        let result = self.transport.send_multipart(request).await;
        self.finish("POST", path, started, uploaded_bytes, result)
    }

    /// DELETE `path`.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete(&self, path: &str) -> HasabResult<ApiResponse> {
        let mut request = HttpRequest::delete(path);
        request.headers = self.headers();

        let started = Instant::now();
        let result = self.transport.send(request).await;
        self.finish("DELETE", path, started, 0, result)
    }

    fn finish(
        &self,
        method: &str,
        path: &str,
        started: Instant,
        uploaded_bytes: u64,
        result: Result<HttpResponse, TransportError>,
    ) -> HasabResult<ApiResponse> {
        let status = result.as_ref().ok().map(|response| response.status);
        let outcome = match result {
            Ok(response) => decode_response(response, self.max_logged_body),
            Err(e) => Err(HasabError::from(e)),
        };

        let operation = format!("{} {}", method, path.trim_start_matches('/'));
        let elapsed = started.elapsed();
        let error_kind = outcome.as_ref().err().map(HasabError::kind);
        if outcome.is_ok() {
            tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, "Request succeeded");
        }

        self.metrics.record_call(&CallRecord {
            operation: &operation,
            status,
            elapsed,
            uploaded_bytes,
            error_kind: error_kind.as_deref(),
        });
        outcome
    }
}

impl std::fmt::Debug for ApiTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiTransport")
            .field("default_headers", &self.default_headers.len())
            .field("max_logged_body", &self.max_logged_body)
            .finish()
    }
}

/// Decodes a raw response.
///
/// Non-2xx statuses fail with [`HasabError::Http`]; their body is logged
/// redacted and cut to `max_logged_body` characters. JSON bodies are decoded
/// as-is; an empty JSON or 204 body decodes to `null`. Anything else is
/// wrapped in a [`BinaryEnvelope`].
pub fn decode_response(response: HttpResponse, max_logged_body: usize) -> HasabResult<ApiResponse> {
    if !response.is_success() {
        let body = String::from_utf8_lossy(&response.body).into_owned();
        tracing::warn!(
            status = response.status,
            body = %logged_body(&body, max_logged_body),
            "Hasab API returned an error status"
        );
        return Err(HasabError::http(response.status, body));
    }

    let blank = response.body.iter().all(u8::is_ascii_whitespace);
    if response.status == 204 && blank {
        return Ok(ApiResponse::Null);
    }

    if is_json(response.header("content-type")) {
        if blank {
            return Ok(ApiResponse::Null);
        }
        return Ok(serde_json::from_slice(&response.body)?);
    }

    tracing::debug!(
        content_type = response.header("content-type").unwrap_or(""),
        size = response.body.len(),
        "Wrapping non-JSON response"
    );
    BinaryEnvelope::from_http(&response).into_response()
}

/// Redacts before truncating so a cut never exposes part of a secret.
fn logged_body(body: &str, max_len: usize) -> String {
    truncate_body(&redact(body), max_len)
}

fn is_json(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.parse::<mime::Mime>().ok())
        .map(|m| m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON))
        .unwrap_or(false)
}
