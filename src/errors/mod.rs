//! Error types for the Hasab client.
//!
//! Two kinds of failure matter to callers: input rejected locally before any
//! request is sent, and a remote call that completed with a non-2xx status.
//! The remaining variants cover configuration and transport failures.

use std::time::Duration;
use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias for Hasab operations.
pub type HasabResult<T> = Result<T, HasabError>;

/// Error type for Hasab client operations.
#[derive(Debug, Error)]
pub enum HasabError {
    /// Input rejected before any network call was made.
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput {
        /// Error message describing the problem.
        message: String,
        /// The option or part that was missing or invalid.
        field: String,
    },

    /// The remote call completed with a non-success status.
    #[error("HTTP error {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Configuration error (missing API key, malformed base URL, etc.)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// Network/connection error.
    #[error("Network error: {message}")]
    Network {
        /// Error message.
        message: String,
    },

    /// Request timed out.
    #[error("Request timeout after {timeout:?}")]
    Timeout {
        /// The timeout that elapsed.
        timeout: Duration,
    },

    /// A local file exists but could not be read.
    #[error("Failed to read '{path}': {message}")]
    FileRead {
        /// Path of the file.
        path: String,
        /// Underlying I/O error message.
        message: String,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },
}

impl HasabError {
    /// Creates an invalid input error for the given field.
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        HasabError::InvalidInput {
            message: message.into(),
            field: field.into(),
        }
    }

    /// Creates an HTTP status error.
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        HasabError::Http {
            status,
            body: body.into(),
        }
    }

    /// Returns the HTTP status code, if this error came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            HasabError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true for 4xx responses.
    pub fn is_client_error(&self) -> bool {
        matches!(self, HasabError::Http { status: 400..=499, .. })
    }

    /// Returns true for 5xx responses.
    pub fn is_server_error(&self) -> bool {
        matches!(self, HasabError::Http { status: 500..=599, .. })
    }

    /// Returns true if the input was rejected locally.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, HasabError::InvalidInput { .. })
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> String {
        match self {
            HasabError::InvalidInput { .. } => "invalid_input".to_string(),
            HasabError::Http { status, .. } => format!("http_{}", status),
            HasabError::Configuration { .. } => "configuration".to_string(),
            HasabError::Network { .. } => "network".to_string(),
            HasabError::Timeout { .. } => "timeout".to_string(),
            HasabError::FileRead { .. } => "file_read".to_string(),
            HasabError::Serialization { .. } => "serialization".to_string(),
        }
    }
}

impl From<TransportError> for HasabError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout { timeout } => HasabError::Timeout { timeout },
            TransportError::InvalidRequest { message } => HasabError::Configuration { message },
            other => HasabError::Network {
                message: other.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for HasabError {
    fn from(err: serde_json::Error) -> Self {
        HasabError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for HasabError {
    fn from(err: url::ParseError) -> Self {
        HasabError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}
