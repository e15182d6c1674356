// crates/core/src/scoring.rs
//! Account risk scoring: fraud, duplicate accounts and session risk.
//!
//! These currently return conservative baselines (low risk, low
//! confidence) so callers can rely on the response shape before a model
//! is wired in.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

// ============================================================================
// Fraud
// ============================================================================

/// Request body for POST /fraud/score-user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FraudScoreRequest {
    pub user_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub firebase_uid: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub device_id: Option<String>,
    pub device_fingerprint: Option<String>,
    /// otp_request, signup, login, session_creation or payment.
    pub request_type: Option<String>,
    pub timestamp: Option<String>,
    pub previous_attempts: Option<u32>,
    /// Days.
    pub account_age: Option<u32>,
    pub metadata: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudScoreResponse {
    /// 0 (safe) to 100.
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub reasons: Vec<String>,
    pub recommendations: Vec<String>,
    pub should_block: bool,
    pub should_require_manual_review: bool,
    pub confidence: f64,
}

pub fn score_fraud(request: &FraudScoreRequest) -> FraudScoreResponse {
    tracing::debug!(
        request_type = request.request_type.as_deref().unwrap_or("unknown"),
        "Scoring fraud risk"
    );
    FraudScoreResponse {
        risk_score: 0,
        risk_level: RiskLevel::Low,
        reasons: Vec::new(),
        recommendations: Vec::new(),
        should_block: false,
        should_require_manual_review: false,
        confidence: 0.3,
    }
}

// ============================================================================
// Duplicate accounts
// ============================================================================

/// Request body for POST /auth/detect-duplicate.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DuplicateDetectionRequest {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub firebase_uid: Option<String>,
    pub device_id: Option<String>,
    pub device_fingerprint: Option<String>,
    pub ip_address: Option<String>,
    pub name: Option<String>,
    pub payment_method_hash: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingAccount {
    pub user_id: String,
    /// phone, email, device, ip, payment or name.
    pub match_type: String,
    pub match_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateDetectionResponse {
    pub is_duplicate: bool,
    pub confidence: f64,
    pub matching_accounts: Vec<MatchingAccount>,
    pub recommendations: Vec<String>,
}

pub fn detect_duplicate(_request: &DuplicateDetectionRequest) -> DuplicateDetectionResponse {
    DuplicateDetectionResponse {
        is_duplicate: false,
        confidence: 0.2,
        matching_accounts: Vec::new(),
        recommendations: Vec::new(),
    }
}

// ============================================================================
// Session risk
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Request body for POST /auth/risk-session.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionRiskRequest {
    pub user_id: Option<String>,
    pub session_id: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub device_id: Option<String>,
    pub device_fingerprint: Option<String>,
    pub previous_ip_address: Option<String>,
    pub previous_device_id: Option<String>,
    pub previous_location: Option<GeoPoint>,
    pub current_location: Option<GeoPoint>,
    pub last_login_at: Option<String>,
    pub current_timestamp: Option<String>,
    pub login_provider: Option<String>,
    pub metadata: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRiskResponse {
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub reasons: Vec<String>,
    pub should_require_verification: bool,
    pub should_block: bool,
    pub recommendations: Vec<String>,
    pub confidence: f64,
}

pub fn assess_session_risk(request: &SessionRiskRequest) -> SessionRiskResponse {
    tracing::debug!(
        login_provider = request.login_provider.as_deref().unwrap_or("unknown"),
        "Assessing session risk"
    );
    SessionRiskResponse {
        risk_score: 0,
        risk_level: RiskLevel::Low,
        reasons: Vec::new(),
        should_require_verification: false,
        should_block: false,
        recommendations: Vec::new(),
        confidence: 0.3,
    }
}
