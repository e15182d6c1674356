// crates/server/src/lib.rs
//! BhoomiSetu AI server library.
//!
//! Axum HTTP surface over the generation, scoring and review units, with
//! queued generation jobs backed by `bhoomi-ai-jobs`.

pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod metrics;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::*;
pub use routes::api_routes;
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the Axum application with all routes and middleware.
///
/// This sets up:
/// - API routes (health, metrics, generation, scoring, reviews, chat)
/// - CORS (allows any origin)
/// - Request tracing
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api_routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        create_app(AppState::local())
    }

    /// Helper to make a GET request to the app.
    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    /// Helper to POST a JSON body and parse the JSON reply.
    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    // ========================================================================
    // Health Endpoint Tests
    // ========================================================================

    #[tokio::test]
    async fn test_health_endpoint() {
        let (status, body) = get(app(), "/health").await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
        assert!(json["uptime_secs"].is_u64());
        assert_eq!(json["jobs"]["queued"], 0);
    }

    // ========================================================================
    // Generation Tests
    // ========================================================================

    #[tokio::test]
    async fn test_generate_local() {
        let (status, json) = post_json(app(), "/generate", json!({"prompt": "2BHK in Pune"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["model"], "local-fallback");
        assert!(json["response"].as_str().unwrap().contains("2BHK in Pune"));
    }

    #[tokio::test]
    async fn test_generate_empty_prompt_rejected() {
        let (status, json) = post_json(app(), "/generate", json!({"prompt": ""})).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"], "Validation error");
    }

    /// POST a raw body and parse the reply as JSON.
    async fn post_raw(uri: &str, content_type: Option<&str>, body: &str) -> (StatusCode, Value) {
        let mut builder = Request::builder().method("POST").uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let response = app()
            .oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).expect("error body is JSON");
        (status, json)
    }

    #[tokio::test]
    async fn test_malformed_body_uses_error_response() {
        let (status, json) = post_raw("/generate", Some("application/json"), "{not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid request body");
        assert!(json["details"].is_string());
    }

    #[tokio::test]
    async fn test_missing_prompt_uses_error_response() {
        let (status, json) = post_raw("/generate/async", Some("application/json"), "{}").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"], "Invalid request body");
        assert!(json["details"].as_str().unwrap().contains("prompt"));
    }

    #[tokio::test]
    async fn test_missing_content_type_uses_error_response() {
        let (status, json) = post_raw("/chat/completion", None, r#"{"message":"hi"}"#).await;

        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(json["error"], "Invalid request body");
    }

    #[tokio::test]
    async fn test_generate_async_returns_queued() {
        let (status, json) = post_json(app(), "/generate/async", json!({"prompt": "villa"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "queued");
        assert_eq!(json["job_id"].as_str().unwrap().len(), 36);
    }

    #[tokio::test]
    async fn test_generate_async_empty_prompt_queues_nothing() {
        let state = AppState::local();
        let (status, _) = post_json(
            create_app(Arc::clone(&state)),
            "/generate/async",
            json!({"prompt": ""}),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(state.jobs.store().is_empty());
    }

    #[tokio::test]
    async fn test_status_unknown_job_404() {
        let (status, body) = get(app(), "/generate/status/does-not-exist").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "Job not found");
        assert_eq!(json["details"], "Job ID: does-not-exist");
    }

    // ========================================================================
    // Scoring, Review and Chat Tests
    // ========================================================================

    #[tokio::test]
    async fn test_fraud_score_defaults() {
        let (status, json) = post_json(app(), "/fraud/score-user", json!({"userId": "u1"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["riskLevel"], "low");
        assert_eq!(json["shouldBlock"], false);
    }

    #[tokio::test]
    async fn test_detect_duplicate_defaults() {
        let (status, json) = post_json(app(), "/auth/detect-duplicate", json!({"phone": "+911234567890"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["isDuplicate"], false);
    }

    #[tokio::test]
    async fn test_risk_session_defaults() {
        let (status, json) = post_json(app(), "/auth/risk-session", json!({"sessionId": "s1"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["shouldRequireVerification"], false);
    }

    #[tokio::test]
    async fn test_review_endpoints() {
        let (status, json) = post_json(
            app(),
            "/reviews/sentiment-analysis",
            json!({"reviewText": "Great location"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["sentimentLabel"], "neutral");

        let (status, json) = post_json(app(), "/reviews/detect-fake", json!({"reviewText": "Best ever"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["isFake"], false);
    }

    #[tokio::test]
    async fn test_chat_completion_escalates() {
        let (status, json) = post_json(
            app(),
            "/chat/completion",
            json!({"message": "I want to visit the plot"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["requiresEscalation"], true);
    }

    // ========================================================================
    // CORS Tests
    // ========================================================================

    #[tokio::test]
    async fn test_cors_headers() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/health")
                    .header("Origin", "http://localhost:3000")
                    .header("Access-Control-Request-Method", "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(
            response.headers().contains_key("access-control-allow-origin"),
            "Expected access-control-allow-origin header"
        );
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("Origin", "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let allow_origin = response.headers().get("access-control-allow-origin");
        assert_eq!(allow_origin.unwrap(), "*");
    }

    // ========================================================================
    // 404 Tests
    // ========================================================================

    #[tokio::test]
    async fn test_404_for_unknown_route() {
        let (status, _body) = get(app(), "/nonexistent").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_404_for_root_path() {
        let (status, _body) = get(app(), "/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_multiple_requests() {
        let app = app();

        let (status1, _) = get(app.clone(), "/health").await;
        assert_eq!(status1, StatusCode::OK);

        let (status2, _) = get(app, "/health").await;
        assert_eq!(status2, StatusCode::OK);
    }
}
