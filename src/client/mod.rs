//! Hasab API client.
//!
//! Provides the main entry point for the transcription, translation,
//! text-to-speech and chat services.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{ApiKeyAuth, AuthProvider};
use crate::config::{HasabConfig, HasabConfigBuilder};
use crate::errors::{HasabError, HasabResult};
use crate::observability::{
    DefaultMetricsCollector, LogConfig, MetricsCollector, DEFAULT_MAX_BODY_LENGTH,
};
use crate::services::{ChatService, TranscriptionService, TranslationService, TtsService};
use crate::transport::{ApiTransport, HttpTransport, HttpTransportImpl};

/// The main Hasab client.
///
/// All services share one transport, so cloning work across tasks only
/// requires a reference to the client.
///
/// # Example
///
/// ```rust,no_run
/// use hasab_client::{HasabClient, TranscriptionOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = HasabClient::builder()
///         .api_key("hsb_your_api_key")
///         .build()?;
///
///     let response = client
///         .transcription()
///         .upload(TranscriptionOptions::new().file("meeting.mp3").is_meeting(true))
///         .await?;
///
///     println!("{}", response["transcription"]);
///     Ok(())
/// }
/// ```
pub struct HasabClient {
    config: HasabConfig,
    transcription_service: TranscriptionService,
    translation_service: TranslationService,
    tts_service: TtsService,
    chat_service: ChatService,
    metrics: Arc<dyn MetricsCollector>,
}

impl HasabClient {
    /// Creates a new client builder.
    pub fn builder() -> HasabClientBuilder {
        HasabClientBuilder::new()
    }

    /// Creates a client from environment variables.
    ///
    /// Reads `HASAB_API_KEY` and optionally `HASAB_BASE_URL`,
    /// `HASAB_API_VERSION` and `HASAB_TIMEOUT`.
    pub fn from_env() -> HasabResult<Self> {
        let config = HasabConfig::from_env()?;
        HasabClientBuilder::from_config(config).build()
    }

    /// Creates a client from an API key with default settings.
    pub fn from_api_key(api_key: impl Into<String>) -> HasabResult<Self> {
        HasabClientBuilder::new().api_key(api_key).build()
    }

    /// Returns the transcription service.
    pub fn transcription(&self) -> &TranscriptionService {
        &self.transcription_service
    }

    /// Returns the translation service.
    pub fn translation(&self) -> &TranslationService {
        &self.translation_service
    }

    /// Returns the text-to-speech service.
    pub fn tts(&self) -> &TtsService {
        &self.tts_service
    }

    /// Returns the chat service.
    pub fn chat(&self) -> &ChatService {
        &self.chat_service
    }

    /// Returns the configuration.
    pub fn config(&self) -> &HasabConfig {
        &self.config
    }

    /// Returns the metrics collector fed by every call.
    pub fn metrics(&self) -> &dyn MetricsCollector {
        self.metrics.as_ref()
    }
}

impl std::fmt::Debug for HasabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HasabClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for the Hasab client.
pub struct HasabClientBuilder {
    config_builder: HasabConfigBuilder,
    config: Option<HasabConfig>,
    transport: Option<Arc<dyn HttpTransport>>,
    auth: Option<Arc<dyn AuthProvider>>,
    metrics: Option<Arc<dyn MetricsCollector>>,
    max_logged_body: usize,
}

impl HasabClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            config_builder: HasabConfigBuilder::new(),
            config: None,
            transport: None,
            auth: None,
            metrics: None,
            max_logged_body: DEFAULT_MAX_BODY_LENGTH,
        }
    }

    /// Creates a builder from an existing configuration.
    ///
    /// Configuration setters called afterwards are ignored.
    pub fn from_config(config: HasabConfig) -> Self {
        Self {
            config: Some(config),
            ..Self::new()
        }
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.api_key(api_key);
        self
    }

    /// Sets the API key from an environment variable.
    pub fn api_key_from_env(mut self, var_name: &str) -> HasabResult<Self> {
        self.config_builder = self.config_builder.api_key_from_env(var_name)?;
        Ok(self)
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(base_url);
        self
    }

    /// Sets the version path segment.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.version(version);
        self
    }

    /// Sends requests directly under the base URL.
    pub fn no_version(mut self) -> Self {
        self.config_builder = self.config_builder.no_version();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config_builder = self.config_builder.timeout_secs(secs);
        self
    }

    /// Adds a header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.header(name, value);
        self
    }

    /// Sets a custom transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a custom auth provider.
    pub fn auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Sets a custom metrics collector.
    pub fn metrics(mut self, metrics: Arc<dyn MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Applies the logging limits in `config` to every call.
    ///
    /// Subscriber installation stays with [`init_logging`](crate::init_logging).
    pub fn log_config(mut self, config: &LogConfig) -> Self {
        self.max_logged_body = config.max_body_length;
        self
    }

    /// Builds the client.
    pub fn build(self) -> HasabResult<HasabClient> {
        let config = match self.config {
            Some(config) => config,
            None => self.config_builder.build()?,
        };

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(
                HttpTransportImpl::new(config.api_base(), config.timeout).map_err(|e| {
                    HasabError::Configuration {
                        message: e.to_string(),
                    }
                })?,
            ),
        };

        let auth: Arc<dyn AuthProvider> = match self.auth {
            Some(a) => a,
            None => Arc::new(ApiKeyAuth::from_string(config.api_key())),
        };
        auth.validate()?;

        let metrics: Arc<dyn MetricsCollector> = self
            .metrics
            .unwrap_or_else(|| Arc::new(DefaultMetricsCollector::new()));

        let http = Arc::new(
            ApiTransport::new(transport, auth, Arc::clone(&metrics))
                .with_headers(config.custom_headers.clone())
                .with_max_logged_body(self.max_logged_body),
        );

        tracing::debug!(
            api_base = %config.api_base(),
            api_key = %config.api_key_hint(),
            "Hasab client initialized"
        );

        Ok(HasabClient {
            transcription_service: TranscriptionService::new(Arc::clone(&http)),
            translation_service: TranslationService::new(Arc::clone(&http)),
            tts_service: TtsService::new(Arc::clone(&http)),
            chat_service: ChatService::new(http),
            config,
            metrics,
        })
    }
}

impl Default for HasabClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
