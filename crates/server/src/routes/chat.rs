// crates/server/src/routes/chat.rs
//! Chat completion endpoint.

use std::sync::Arc;

use axum::{routing::post, Json, Router};
use bhoomi_ai_core::chat;
use bhoomi_ai_core::{ChatCompletionRequest, ChatCompletionResponse};

use crate::extract::ApiJson;
use crate::state::AppState;

/// POST /chat/completion - Rule-based assistant reply.
pub async fn completion(
    ApiJson(payload): ApiJson<ChatCompletionRequest>,
) -> Json<ChatCompletionResponse> {
    let reply = chat::respond(&payload);
    tracing::debug!(
        history = payload.conversation_history.len(),
        escalate = reply.requires_escalation,
        "Chat reply built"
    );
    Json(reply)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/chat/completion", post(completion))
}
