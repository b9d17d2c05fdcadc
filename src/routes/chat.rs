//! Sales advisor chat routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::services::chat::{self, ChatOverview};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// `GET /api/chat`: KPI badges, quick prompts and the opening transcript.
pub async fn overview() -> Json<ChatOverview> {
    Json(chat::overview())
}

/// `POST /api/chat`: answer one question after the configured pause.
pub async fn send(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatReply>, StatusCode> {
    let message = body.message.trim();
    if message.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    if !state.chat_delay.is_zero() {
        tokio::time::sleep(state.chat_delay).await;
    }
    let reply = chat::answer(message);
    info!(chars = message.chars().count(), "chat answered");
    Ok(Json(ChatReply { reply }))
}
