//! HTTP transport layer for the Hasab client.
//!
//! Provides the raw HTTP transport abstraction, its reqwest implementation,
//! and the [`ApiTransport`] executor that every service delegates to.

mod api;
mod http;

pub use api::{decode_response, ApiTransport};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, HttpTransportImpl};

use std::collections::HashMap;
use std::time::Duration;

/// Multipart request for file uploads.
#[derive(Debug, Clone)]
pub struct MultipartRequest {
    /// Request path.
    pub path: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Multipart form parts.
    pub parts: Vec<MultipartPart>,
}

/// A part of a multipart form.
#[derive(Debug, Clone, PartialEq)]
pub enum MultipartPart {
    /// Text field.
    Text {
        /// Field name.
        name: String,
        /// Field value.
        value: String,
    },
    /// File field.
    File {
        /// Field name.
        name: String,
        /// File name.
        filename: String,
        /// Content type; left to the server when absent.
        content_type: Option<String>,
        /// File data.
        data: Vec<u8>,
    },
}

impl MultipartPart {
    /// Returns the part name.
    pub fn name(&self) -> &str {
        match self {
            MultipartPart::Text { name, .. } | MultipartPart::File { name, .. } => name,
        }
    }
}

/// Transport error types.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection error.
    #[error("Connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Timeout error.
    #[error("Timeout after {timeout:?}")]
    Timeout {
        /// Timeout duration.
        timeout: Duration,
    },

    /// The request could not be built.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// Invalid response.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },
}
