//! Application metrics for Prometheus monitoring.
//!
//! This module provides:
//! - Prometheus metrics recorder initialization
//! - Metric definitions (counters and gauges)
//! - Helper functions for recording metrics

use bhoomi_ai_jobs::JobCounts;
use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// Global Prometheus handle for rendering metrics.
static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the Prometheus metrics recorder.
///
/// Call once at startup, before any metrics are recorded.
/// Returns `true` if initialization succeeded, `false` if already initialized.
pub fn init_metrics() -> bool {
    if PROMETHEUS_HANDLE.get().is_some() {
        return false;
    }

    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();

    if metrics::set_global_recorder(recorder).is_err() {
        tracing::warn!("Failed to set global metrics recorder (already set)");
        return false;
    }

    if PROMETHEUS_HANDLE.set(handle).is_err() {
        tracing::warn!("Failed to store Prometheus handle (already set)");
    }

    describe_metrics();

    tracing::info!("Prometheus metrics initialized");
    true
}

fn describe_metrics() {
    describe_counter!(
        "generate_requests_total",
        "Total number of generation requests by endpoint"
    );
    describe_counter!(
        "generate_errors_total",
        "Inline generations that fell back to the default payload"
    );
    describe_gauge!(
        "generate_last_request_timestamp_seconds",
        "Unix timestamp of the most recent generation request"
    );
    describe_counter!("jobs_submitted_total", "Total number of queued generation jobs");
    describe_gauge!("jobs_retained", "Job records currently held, by status");
}

/// Render current metrics in Prometheus text format.
///
/// Returns `None` if metrics are not initialized.
pub fn render_metrics() -> Option<String> {
    PROMETHEUS_HANDLE.get().map(|h| h.render())
}

/// Record an accepted generation request.
///
/// # Arguments
/// * `endpoint` - Route name ("generate" or "generate_async")
pub fn record_generate_request(endpoint: &'static str) {
    counter!("generate_requests_total", "endpoint" => endpoint).increment(1);
    gauge!("generate_last_request_timestamp_seconds").set(chrono::Utc::now().timestamp() as f64);
}

pub fn record_generate_error() {
    counter!("generate_errors_total").increment(1);
}

pub fn record_job_submitted() {
    counter!("jobs_submitted_total").increment(1);
}

/// Publish the current per-status record counts.
pub fn record_job_counts(counts: JobCounts) {
    gauge!("jobs_retained", "status" => "queued").set(counts.queued as f64);
    gauge!("jobs_retained", "status" => "done").set(counts.done as f64);
    gauge!("jobs_retained", "status" => "failed").set(counts.failed as f64);
}
