//! Request metrics for the Hasab client.
//!
//! [`ApiTransport`](crate::transport::ApiTransport) reports one
//! [`CallRecord`] per finished call.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// A finished API call as seen by the metrics collector.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord<'a> {
    /// `"METHOD path"`, e.g. `"POST upload-audio"`.
    pub operation: &'a str,
    /// Status code, or `None` when no response arrived.
    pub status: Option<u16>,
    /// Wall time from send to decoded response.
    pub elapsed: Duration,
    /// Bytes sent in multipart file parts.
    pub uploaded_bytes: u64,
    /// Error kind (see [`HasabError::kind`](crate::HasabError::kind)) for failed calls.
    pub error_kind: Option<&'a str>,
}

impl CallRecord<'_> {
    /// Returns true if the call produced a decoded response.
    pub fn succeeded(&self) -> bool {
        self.error_kind.is_none()
    }
}

/// Metrics collector interface.
pub trait MetricsCollector: Send + Sync {
    /// Records a finished call.
    fn record_call(&self, call: &CallRecord<'_>);

    /// Returns a snapshot of the counters.
    fn snapshot(&self) -> RequestMetrics;

    /// Resets all counters.
    fn reset(&self);
}

/// Counter snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestMetrics {
    /// Calls issued.
    pub total_requests: u64,
    /// Calls that returned a decoded response.
    pub successful_requests: u64,
    /// Calls that failed after being issued.
    pub failed_requests: u64,
    /// Sum of call latencies in milliseconds.
    pub total_latency_ms: u64,
    /// Bytes uploaded in file parts (audio and images).
    pub uploaded_bytes: u64,
    /// Calls per operation.
    pub operations: BTreeMap<String, u64>,
    /// Responses per status code.
    pub statuses: BTreeMap<u16, u64>,
    /// Failures per error kind.
    pub errors: BTreeMap<String, u64>,
}

impl RequestMetrics {
    /// Average latency in milliseconds.
    pub fn average_latency_ms(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.total_latency_ms as f64 / self.total_requests as f64
        }
    }

    /// Success rate as a percentage; 100 when nothing was sent.
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            100.0
        } else {
            (self.successful_requests as f64 / self.total_requests as f64) * 100.0
        }
    }

    fn apply(&mut self, call: &CallRecord<'_>) {
        self.total_requests += 1;
        if call.succeeded() {
            self.successful_requests += 1;
        } else {
            self.failed_requests += 1;
        }
        self.total_latency_ms += call.elapsed.as_millis() as u64;
        self.uploaded_bytes += call.uploaded_bytes;

        *self.operations.entry(call.operation.to_string()).or_insert(0) += 1;
        if let Some(status) = call.status {
            *self.statuses.entry(status).or_insert(0) += 1;
        }
        if let Some(kind) = call.error_kind {
            *self.errors.entry(kind.to_string()).or_insert(0) += 1;
        }
    }
}

/// In-memory collector used by default.
#[derive(Default)]
pub struct DefaultMetricsCollector {
    state: Mutex<RequestMetrics>,
}

impl DefaultMetricsCollector {
    /// Creates a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, RequestMetrics> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl MetricsCollector for DefaultMetricsCollector {
    fn record_call(&self, call: &CallRecord<'_>) {
        self.state().apply(call);
    }

    fn snapshot(&self) -> RequestMetrics {
        self.state().clone()
    }

    fn reset(&self) {
        *self.state() = RequestMetrics::default();
    }
}

impl std::fmt::Debug for DefaultMetricsCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("DefaultMetricsCollector")
            .field("total_requests", &state.total_requests)
            .field("failed_requests", &state.failed_requests)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn call<'a>(operation: &'a str, status: Option<u16>, ms: u64) -> CallRecord<'a> {
        CallRecord {
            operation,
            status,
            elapsed: Duration::from_millis(ms),
            uploaded_bytes: 0,
            error_kind: None,
        }
    }

    #[test]
    fn test_records_statuses_and_errors() {
        let collector = DefaultMetricsCollector::new();

        collector.record_call(&call("GET audios", Some(200), 20));
        collector.record_call(&CallRecord {
            error_kind: Some("http_404"),
            ..call("GET audios", Some(404), 40)
        });
        collector.record_call(&CallRecord {
            error_kind: Some("timeout"),
            ..call("POST chat", None, 30)
        });

        let metrics = collector.snapshot();
        assert_eq!(metrics.total_requests, 3);
        assert_eq!(metrics.successful_requests, 1);
        assert_eq!(metrics.failed_requests, 2);
        assert_eq!(metrics.operations.get("GET audios"), Some(&2));
        assert_eq!(metrics.statuses.get(&200), Some(&1));
        assert_eq!(metrics.statuses.get(&404), Some(&1));
        assert_eq!(metrics.statuses.len(), 2);
        assert_eq!(metrics.errors.get("timeout"), Some(&1));
        assert!((metrics.average_latency_ms() - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_accumulates_uploaded_bytes() {
        let collector = DefaultMetricsCollector::new();

        collector.record_call(&CallRecord {
            uploaded_bytes: 1_024,
            ..call("POST upload-audio", Some(200), 5)
        });
        collector.record_call(&CallRecord {
            uploaded_bytes: 512,
            ..call("POST chat", Some(200), 5)
        });

        assert_eq!(collector.snapshot().uploaded_bytes, 1_536);
    }

    #[test]
    fn test_reset() {
        let collector = DefaultMetricsCollector::new();
        collector.record_call(&call("POST chat", Some(200), 5));
        collector.reset();

        assert_eq!(collector.snapshot(), RequestMetrics::default());
        assert!((collector.snapshot().success_rate() - 100.0).abs() < f64::EPSILON);
    }
}
