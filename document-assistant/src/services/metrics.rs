//! Metrics collection and Prometheus export.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Later calls are no-ops.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
        }
        Err(e) => tracing::error!(error = %e, "Failed to install Prometheus recorder"),
    }
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

/// Count one backend call by endpoint and outcome.
pub fn record_backend_call(endpoint: &'static str, outcome: &'static str) {
    metrics::counter!(
        "backend_requests_total",
        "endpoint" => endpoint,
        "outcome" => outcome
    )
    .increment(1);
}
