//! Prometheus metrics endpoint.
//!
//! Exposes application metrics in Prometheus text format at `GET /metrics`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::metrics::{record_job_counts, render_metrics};
use crate::state::AppState;

/// GET /metrics - Prometheus metrics endpoint.
///
/// Refreshes the job gauges, then renders. Returns 503 Service Unavailable
/// if metrics are not initialized.
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    record_job_counts(state.jobs.store().counts());

    match render_metrics() {
        Some(output) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            output,
        )
            .into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "Metrics not initialized").into_response(),
    }
}

/// Create the metrics routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/metrics", get(metrics_handler))
}
