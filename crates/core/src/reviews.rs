// crates/core/src/reviews.rs
//! Review analysis: sentiment and fake-review detection.

use serde::{Deserialize, Serialize};

/// Request body for POST /reviews/sentiment-analysis.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SentimentAnalysisRequest {
    pub review_text: String,
    pub title: Option<String>,
    pub pros: Option<String>,
    pub cons: Option<String>,
    pub rating: Option<f64>,
    /// after_viewing, after_deal or after_interaction.
    pub context: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentBreakdown {
    pub positive_aspects: Vec<String>,
    pub negative_aspects: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentAnalysisResponse {
    /// -1.0 (negative) to 1.0 (positive).
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub confidence: f64,
    pub key_phrases: Vec<String>,
    pub topics: Vec<String>,
    pub analysis: SentimentBreakdown,
}

pub fn analyze_sentiment(request: &SentimentAnalysisRequest) -> SentimentAnalysisResponse {
    tracing::debug!(chars = request.review_text.len(), "Analyzing review sentiment");
    SentimentAnalysisResponse {
        sentiment_score: 0.0,
        sentiment_label: SentimentLabel::Neutral,
        confidence: 0.3,
        key_phrases: Vec::new(),
        topics: Vec::new(),
        analysis: SentimentBreakdown::default(),
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousReview {
    pub review_id: String,
    pub review_text: String,
    pub rating: f64,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FakeDetectionContext {
    pub previous_reviews: Vec<PreviousReview>,
    pub review_count: Option<u32>,
    /// Days.
    pub account_age: Option<u32>,
    pub verified_purchase: Option<bool>,
}

/// Request body for POST /reviews/detect-fake.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FakeReviewDetectionRequest {
    pub review_text: String,
    pub title: Option<String>,
    pub rating: Option<f64>,
    pub reviewer_id: Option<String>,
    pub reviewee_id: Option<String>,
    pub property_id: Option<String>,
    pub interest_expression_id: Option<String>,
    pub chat_session_id: Option<String>,
    pub context: Option<FakeDetectionContext>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextPatterns {
    pub generic_language: bool,
    pub duplicate_content: bool,
    pub suspicious_keywords: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingAnomalies {
    pub extreme_rating: bool,
    pub rating_mismatch: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehavioralPatterns {
    pub bulk_reviewing: bool,
    pub account_age: bool,
    pub unverified_purchase: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FakeReviewAnalysis {
    pub text_patterns: TextPatterns,
    pub rating_anomalies: RatingAnomalies,
    pub behavioral_patterns: BehavioralPatterns,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FakeReviewDetectionResponse {
    /// 0.0 (genuine) to 1.0 (fake).
    pub fake_review_score: f64,
    pub is_fake: bool,
    pub confidence: f64,
    pub reasons: Vec<String>,
    pub analysis: FakeReviewAnalysis,
    pub recommendations: Vec<String>,
}

pub fn detect_fake_review(request: &FakeReviewDetectionRequest) -> FakeReviewDetectionResponse {
    tracing::debug!(
        property_id = request.property_id.as_deref().unwrap_or("none"),
        "Checking review authenticity"
    );
    FakeReviewDetectionResponse {
        fake_review_score: 0.0,
        is_fake: false,
        confidence: 0.3,
        reasons: Vec::new(),
        analysis: FakeReviewAnalysis::default(),
        recommendations: Vec::new(),
    }
}
