//! Observability for the Hasab client.
//!
//! Requests are traced with `tracing`; this module adds subscriber setup,
//! redaction for logged bodies, and request counters.

mod logging;
mod metrics;

pub use logging::{
    init_logging, redact, truncate_body, LogConfig, LogFormat, DEFAULT_MAX_BODY_LENGTH,
};
pub use metrics::{CallRecord, DefaultMetricsCollector, MetricsCollector, RequestMetrics};
