//! Prometheus metrics for deck-server.
//!
//! Provides metrics collection and a Prometheus-compatible `/metrics`
//! endpoint.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

// Metric names as constants for consistency
const HTTP_REQUESTS_TOTAL: &str = "deck_http_requests_total";
const HTTP_REQUEST_DURATION: &str = "deck_http_request_duration_seconds";
const SLIDE_WRITES_TOTAL: &str = "deck_slide_writes_total";
const SLIDES_STORED: &str = "deck_slides_stored";
const TEMPLATE_APPLICATIONS_TOTAL: &str = "deck_template_applications_total";
const EXPORTS_TOTAL: &str = "deck_exports_total";
const VALIDATION_FAILURES_TOTAL: &str = "deck_validation_failures_total";

/// Initialize metrics and return the Prometheus handle.
///
/// # Errors
///
/// Returns an error if the Prometheus recorder cannot be installed
/// (e.g., if another recorder is already installed).
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        HTTP_REQUEST_DURATION,
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_secs);
}

/// Record a slide document write.
pub fn record_slide_write() {
    counter!(SLIDE_WRITES_TOTAL).increment(1);
}

/// Update the stored slide count.
#[allow(clippy::cast_precision_loss)]
pub fn set_slides_stored(count: usize) {
    gauge!(SLIDES_STORED).set(count as f64);
}

/// Record a template application attempt.
///
/// `outcome` is one of "ok", "not_found", "upgrade_required".
pub fn record_template_application(outcome: &str) {
    counter!(
        TEMPLATE_APPLICATIONS_TOTAL,
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// Record a static export.
pub fn record_export(success: bool) {
    counter!(
        EXPORTS_TOTAL,
        "success" => success.to_string()
    )
    .increment(1);
}

/// Record an input validation failure.
pub fn record_validation_failure(kind: &str) {
    counter!(
        VALIDATION_FAILURES_TOTAL,
        "kind" => kind.to_string()
    )
    .increment(1);
}
