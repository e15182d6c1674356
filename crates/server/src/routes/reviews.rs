// crates/server/src/routes/reviews.rs
//! Review analysis endpoints.

use std::sync::Arc;

use axum::{routing::post, Json, Router};
use bhoomi_ai_core::reviews::{
    self, FakeReviewDetectionRequest, FakeReviewDetectionResponse, SentimentAnalysisRequest,
    SentimentAnalysisResponse,
};

use crate::extract::ApiJson;
use crate::state::AppState;

pub async fn sentiment_analysis(
    ApiJson(payload): ApiJson<SentimentAnalysisRequest>,
) -> Json<SentimentAnalysisResponse> {
    Json(reviews::analyze_sentiment(&payload))
}

pub async fn detect_fake(
    ApiJson(payload): ApiJson<FakeReviewDetectionRequest>,
) -> Json<FakeReviewDetectionResponse> {
    Json(reviews::detect_fake_review(&payload))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reviews/sentiment-analysis", post(sentiment_analysis))
        .route("/reviews/detect-fake", post(detect_fake))
}
