//! Response values returned to callers.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{HasabError, HasabResult};
use crate::transport::HttpResponse;

/// Decoded response body, passed through exactly as the service sent it.
pub type ApiResponse = serde_json::Value;

/// Envelope synthesized for successful responses that are not JSON,
/// such as synthesized audio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryEnvelope {
    /// Content type reported by the server (empty if none).
    pub content_type: String,
    /// Base64-encoded body.
    pub body: String,
    /// Body size in bytes.
    pub size: usize,
    /// Response headers.
    pub headers: BTreeMap<String, String>,
}

impl BinaryEnvelope {
    /// Builds the envelope for a raw HTTP response.
    pub fn from_http(response: &HttpResponse) -> Self {
        Self {
            content_type: response.header("content-type").unwrap_or_default().to_string(),
            body: STANDARD.encode(&response.body),
            size: response.body.len(),
            headers: response
                .headers
                .iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), v.clone()))
                .collect(),
        }
    }

    /// Recovers an envelope from a response value, if it has that shape.
    pub fn from_response(response: &ApiResponse) -> Option<Self> {
        serde_json::from_value(response.clone()).ok()
    }

    /// Decodes the body bytes.
    pub fn bytes(&self) -> HasabResult<Vec<u8>> {
        STANDARD
            .decode(&self.body)
            .map_err(|e| HasabError::Serialization {
                message: format!("Invalid base64 body: {}", e),
            })
    }

    /// Converts the envelope to a response value.
    pub fn into_response(self) -> HasabResult<ApiResponse> {
        Ok(serde_json::to_value(self)?)
    }
}
