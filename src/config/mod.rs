//! Configuration module for the Hasab client.
//!
//! Holds the API key, base URL, version segment and request timeout. The
//! configuration is resolved once and never changes afterwards.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

use crate::auth::key_hint;
use crate::errors::{HasabError, HasabResult};

/// Default base URL for the Hasab API.
pub const DEFAULT_BASE_URL: &str = "https://api.hasab.co/api";

/// Default API version path segment.
pub const DEFAULT_VERSION: &str = "v1";

/// Default request timeout (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Hasab client.
#[derive(Clone)]
pub struct HasabConfig {
    /// API key for authentication (stored securely).
    pub(crate) api_key: SecretString,
    /// Base URL for API requests, without a trailing slash.
    pub base_url: String,
    /// Version segment appended to the base URL, if any.
    pub version: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
    /// Custom headers to include in requests.
    pub custom_headers: Vec<(String, String)>,
}

impl HasabConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> HasabConfigBuilder {
        HasabConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `HASAB_API_KEY` (required): API key for authentication
    /// - `HASAB_BASE_URL` (optional): Custom base URL
    /// - `HASAB_API_VERSION` (optional): Version segment; empty disables it
    /// - `HASAB_TIMEOUT` (optional): Request timeout in seconds
    pub fn from_env() -> HasabResult<Self> {
        HasabConfigBuilder::new()
            .api_key_from_env("HASAB_API_KEY")?
            .with_env_overrides()
            .build()
    }

    /// Returns the API key (exposing the secret).
    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Returns the API key hint (last 4 characters) for debugging.
    pub fn api_key_hint(&self) -> String {
        key_hint(self.api_key.expose_secret())
    }

    /// Returns `{base_url}/{version}`, or the base URL when no version is set.
    pub fn api_base(&self) -> String {
        match &self.version {
            Some(version) => format!("{}/{}", self.base_url, version),
            None => self.base_url.clone(),
        }
    }

    /// Returns the full URL for an endpoint.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base(), path.trim_start_matches('/'))
    }
}

impl std::fmt::Debug for HasabConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HasabConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Builder for `HasabConfig`.
#[derive(Default)]
pub struct HasabConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    version: Option<Option<String>>,
    timeout: Option<Duration>,
    custom_headers: Vec<(String, String)>,
}

impl HasabConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the API key from an environment variable.
    pub fn api_key_from_env(mut self, var_name: &str) -> HasabResult<Self> {
        let api_key = std::env::var(var_name).map_err(|_| HasabError::Configuration {
            message: format!("Environment variable {} not set", var_name),
        })?;
        self.api_key = Some(api_key);
        Ok(self)
    }

    /// Applies `HASAB_BASE_URL`, `HASAB_API_VERSION` and `HASAB_TIMEOUT` when set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(base_url) = std::env::var("HASAB_BASE_URL") {
            self = self.base_url(base_url);
        }

        if let Ok(version) = std::env::var("HASAB_API_VERSION") {
            self = self.version(version);
        }

        if let Ok(timeout_str) = std::env::var("HASAB_TIMEOUT") {
            match timeout_str.parse::<u64>() {
                Ok(secs) => self = self.timeout_secs(secs),
                Err(_) => tracing::warn!(value = %timeout_str, "Ignoring invalid HASAB_TIMEOUT"),
            }
        }

        self
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the version segment. An empty string disables it.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(Some(version.into()));
        self
    }

    /// Sends requests directly under the base URL.
    pub fn no_version(mut self) -> Self {
        self.version = Some(None);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Adds a custom header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.push((name.into(), value.into()));
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> HasabResult<HasabConfig> {
        let api_key = self.api_key.ok_or_else(|| HasabError::Configuration {
            message: "API key is required".to_string(),
        })?;

        if api_key.trim().is_empty() {
            return Err(HasabError::Configuration {
                message: "API key cannot be empty".to_string(),
            });
        }

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let parsed = Url::parse(&base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(HasabError::Configuration {
                message: format!("Base URL must use http or https, got '{}'", parsed.scheme()),
            });
        }
        if parsed.scheme() == "http" {
            tracing::warn!(base_url = %base_url, "Hasab base URL is not using HTTPS");
        }

        let version = self
            .version
            .unwrap_or_else(|| Some(DEFAULT_VERSION.to_string()))
            .map(|v| v.trim_matches('/').to_string())
            .filter(|v| !v.is_empty());

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(HasabError::Configuration {
                message: "Timeout must be greater than zero".to_string(),
            });
        }

        Ok(HasabConfig {
            api_key: SecretString::new(api_key),
            base_url,
            version,
            timeout,
            custom_headers: self.custom_headers,
        })
    }
}
