//! API route handlers for the BhoomiSetu AI server.

pub mod chat;
pub mod generate;
pub mod health;
pub mod metrics;
pub mod reviews;
pub mod scoring;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Create the combined API router.
///
/// Routes:
/// - GET  /health - Health check
/// - GET  /metrics - Prometheus metrics
/// - POST /generate - Inline generation with fallback
/// - POST /generate/async - Queue a generation job
/// - GET  /generate/status/{job_id} - Poll a generation job
/// - POST /fraud/score-user - Fraud risk score
/// - POST /auth/detect-duplicate - Duplicate account detection
/// - POST /auth/risk-session - Session risk assessment
/// - POST /reviews/sentiment-analysis - Review sentiment
/// - POST /reviews/detect-fake - Fake review detection
/// - POST /chat/completion - Assistant chat reply
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::router())
        .merge(metrics::router())
        .merge(generate::router())
        .merge(scoring::router())
        .merge(reviews::router())
        .merge(chat::router())
        .with_state(state)
}
