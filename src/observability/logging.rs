//! Logging setup and log hygiene helpers.

use std::sync::OnceLock;

use regex::Regex;
use tracing_subscriber::EnvFilter;

/// Output format for [`init_logging`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub default_directive: String,
    /// Output format.
    pub format: LogFormat,
    /// Maximum number of body characters included in log events.
    pub max_body_length: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_directive: "hasab_client=info".to_string(),
            format: LogFormat::Pretty,
            max_body_length: DEFAULT_MAX_BODY_LENGTH,
        }
    }
}

impl LogConfig {
    /// Creates a new log configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback filter directive.
    pub fn directive(mut self, directive: impl Into<String>) -> Self {
        self.default_directive = directive.into();
        self
    }

    /// Emits JSON lines.
    pub fn json(mut self) -> Self {
        self.format = LogFormat::Json;
        self
    }

    /// Caps how many characters of a response body are logged.
    pub fn max_body_length(mut self, max_len: usize) -> Self {
        self.max_body_length = max_len;
        self
    }
}

/// Body characters kept in log events by default.
pub const DEFAULT_MAX_BODY_LENGTH: usize = 512;

/// Installs a global `tracing` subscriber.
///
/// Host applications that already install a subscriber should skip this;
/// calling it twice is harmless and returns `false` the second time.
pub fn init_logging(config: &LogConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_directive));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.format {
        LogFormat::Pretty => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    }
}

fn redaction_patterns() -> &'static [(Regex, &'static str)] {
    static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            (r"Bearer [A-Za-z0-9._~+/=-]+", "Bearer ***"),
            (r#"(?i)"(api_key|token|key)"\s*:\s*"[^"]*""#, r#""$1":"***""#),
        ]
        .into_iter()
        .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
        .collect()
    })
}

/// Masks bearer tokens and key-like JSON members in text bound for logs.
pub fn redact(text: &str) -> String {
    redaction_patterns()
        .iter()
        .fold(text.to_string(), |acc, (re, replacement)| {
            re.replace_all(&acc, *replacement).into_owned()
        })
}

/// Shortens a body for logging, respecting character boundaries.
pub fn truncate_body(body: &str, max_len: usize) -> String {
    if body.chars().count() <= max_len {
        return body.to_string();
    }
    let kept: String = body.chars().take(max_len).collect();
    format!("{}... ({} bytes total)", kept, body.len())
}
