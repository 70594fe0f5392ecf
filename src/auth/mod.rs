//! Authentication for the Hasab client.
//!
//! Every request carries the API key as a bearer token.

use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;

use crate::errors::HasabError;

/// Authentication provider trait.
///
/// Implementations of this trait provide authentication credentials
/// for API requests.
pub trait AuthProvider: Send + Sync {
    /// Apply authentication to request headers.
    fn apply_auth(&self, headers: &mut HashMap<String, String>);

    /// Get the authentication scheme name.
    fn scheme(&self) -> &str;

    /// Validate the credentials.
    fn validate(&self) -> Result<(), HasabError>;
}

/// API key authentication provider using `Authorization: Bearer <key>`.
pub struct ApiKeyAuth {
    api_key: SecretString,
}

impl ApiKeyAuth {
    /// Creates a new API key authentication provider.
    pub fn new(api_key: SecretString) -> Self {
        Self { api_key }
    }

    /// Creates from a string API key.
    pub fn from_string(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
        }
    }

    /// Gets a hint of the API key for debugging (last 4 characters).
    pub fn key_hint(&self) -> String {
        key_hint(self.api_key.expose_secret())
    }
}

pub(crate) fn key_hint(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 4 {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("...{}", tail)
    } else {
        "****".to_string()
    }
}

impl AuthProvider for ApiKeyAuth {
    fn apply_auth(&self, headers: &mut HashMap<String, String>) {
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.api_key.expose_secret()),
        );
    }

    fn scheme(&self) -> &str {
        "Bearer"
    }

    fn validate(&self) -> Result<(), HasabError> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(HasabError::Configuration {
                message: "API key cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuth")
            .field("api_key", &"[REDACTED]")
            .field("key_hint", &self.key_hint())
            .finish()
    }
}
