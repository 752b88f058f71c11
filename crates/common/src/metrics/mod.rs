//! Metrics and observability utilities
//!
//! Provides Prometheus metrics with standardized naming conventions.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all khreact metrics
pub const METRICS_PREFIX: &str = "khreact";

/// Histogram buckets for request latency (in seconds)
pub const LATENCY_BUCKETS: &[f64] = &[
    0.001, // 1ms
    0.005, // 5ms
    0.010, // 10ms
    0.025, // 25ms
    0.050, // 50ms
    0.100, // 100ms
    0.250, // 250ms
    0.500, // 500ms
    1.000, // 1s
    2.500, // 2.5s
    5.000, // 5s
];

/// Kind of write applied to a point, used as a metric label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointOperation {
    Created,
    Updated,
    Patched,
    Deleted,
}

impl PointOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointOperation::Created => "created",
            PointOperation::Updated => "updated",
            PointOperation::Patched => "patched",
            PointOperation::Deleted => "deleted",
        }
    }
}

/// Register all metric descriptions
pub fn register_metrics() {
    // Request metrics
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    // Point metrics
    describe_counter!(
        format!("{}_point_writes_total", METRICS_PREFIX),
        Unit::Count,
        "Total point writes, labelled by operation"
    );

    describe_counter!(
        format!("{}_point_reads_total", METRICS_PREFIX),
        Unit::Count,
        "Total point lookups and list queries"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Record a point write
pub fn record_point_write(operation: PointOperation) {
    counter!(
        format!("{}_point_writes_total", METRICS_PREFIX),
        "operation" => operation.as_str()
    )
    .increment(1);
}

/// Record a point read; `kind` is "one" or "page"
pub fn record_point_read(kind: &'static str) {
    counter!(
        format!("{}_point_reads_total", METRICS_PREFIX),
        "kind" => kind
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_buckets() {
        let mut prev = 0.0;
        for &bucket in LATENCY_BUCKETS {
            assert!(bucket > prev);
            prev = bucket;
        }
    }

    #[test]
    fn test_operation_labels() {
        assert_eq!(PointOperation::Created.as_str(), "created");
        assert_eq!(PointOperation::Deleted.as_str(), "deleted");
    }

    #[test]
    fn test_request_metrics() {
        let metrics = RequestMetrics::start("GET", "/api/points");
        metrics.finish(200);
        record_point_write(PointOperation::Patched);
        record_point_read("page");
        // No recorder installed: just verify it runs without panic
    }
}
