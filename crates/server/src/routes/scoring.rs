// crates/server/src/routes/scoring.rs
//! Fraud and account risk endpoints.

use std::sync::Arc;

use axum::{routing::post, Json, Router};
use bhoomi_ai_core::scoring::{
    self, DuplicateDetectionRequest, DuplicateDetectionResponse, FraudScoreRequest,
    FraudScoreResponse, SessionRiskRequest, SessionRiskResponse,
};

use crate::extract::ApiJson;
use crate::state::AppState;

/// POST /fraud/score-user
pub async fn score_user(
    ApiJson(payload): ApiJson<FraudScoreRequest>,
) -> Json<FraudScoreResponse> {
    Json(scoring::score_fraud(&payload))
}

/// POST /auth/detect-duplicate
pub async fn detect_duplicate(
    ApiJson(payload): ApiJson<DuplicateDetectionRequest>,
) -> Json<DuplicateDetectionResponse> {
    Json(scoring::detect_duplicate(&payload))
}

/// POST /auth/risk-session
pub async fn risk_session(
    ApiJson(payload): ApiJson<SessionRiskRequest>,
) -> Json<SessionRiskResponse> {
    Json(scoring::assess_session_risk(&payload))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/fraud/score-user", post(score_user))
        .route("/auth/detect-duplicate", post(detect_duplicate))
        .route("/auth/risk-session", post(risk_session))
}
