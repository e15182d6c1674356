// crates/server/src/routes/generate.rs
//! Text generation endpoints.
//!
//! - POST /generate - Generate inline; any failure returns the fallback payload
//! - POST /generate/async - Queue a generation job and return its id
//! - GET  /generate/status/{job_id} - Poll a queued generation job

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use bhoomi_ai_core::{GenerateRequest, GenerateResponse};
use bhoomi_ai_jobs::{JobId, JobStatus};
use serde::Serialize;

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::metrics;
use crate::state::AppState;

/// Response for POST /generate/async.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct GenerateAsyncResponse {
    pub job_id: String,
    pub status: JobStatus,
}

/// Response for GET /generate/status/{job_id}.
///
/// `result` is serialized as `null` until the job is done.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct GenerateStatusResponse {
    pub job_id: String,
    pub status: JobStatus,
    pub result: Option<GenerateResponse>,
}

/// POST /generate - Run generation in the request task.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<GenerateRequest>,
) -> ApiResult<Json<GenerateResponse>> {
    payload.validate()?;
    metrics::record_generate_request("generate");

    let response = state
        .jobs
        .run_now(state.generator.generate(&payload.prompt), |_| {
            metrics::record_generate_error();
            GenerateResponse::fallback()
        })
        .await;

    Ok(Json(response))
}

/// POST /generate/async - Queue generation and return immediately.
pub async fn generate_async(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<GenerateRequest>,
) -> ApiResult<Json<GenerateAsyncResponse>> {
    payload.validate()?;
    metrics::record_generate_request("generate_async");

    let generator = Arc::clone(&state.generator);
    let prompt = payload.prompt;
    let job_id = state
        .jobs
        .submit(move || async move { generator.generate(&prompt).await })?;

    metrics::record_job_submitted();
    tracing::info!(job_id = %job_id, "Generation job queued");

    Ok(Json(GenerateAsyncResponse {
        job_id: job_id.to_string(),
        status: JobStatus::Queued,
    }))
}

/// GET /generate/status/{job_id} - Current state of a queued job.
pub async fn generate_status(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<GenerateStatusResponse>> {
    let snapshot = state.jobs.status(&JobId::from(job_id))?;

    Ok(Json(GenerateStatusResponse {
        job_id: snapshot.id.to_string(),
        status: snapshot.status,
        result: snapshot.result,
    }))
}

/// Create the generation routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate", post(generate))
        .route("/generate/async", post(generate_async))
        .route("/generate/status/{job_id}", get(generate_status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_response_serializes_null_result() {
        let response = GenerateStatusResponse {
            job_id: "abc".to_string(),
            status: JobStatus::Queued,
            result: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"job_id":"abc","status":"queued","result":null}"#);
    }

    #[test]
    fn test_async_response_shape() {
        let response = GenerateAsyncResponse {
            job_id: "abc".to_string(),
            status: JobStatus::Queued,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"job_id":"abc","status":"queued"}"#);
    }
}
