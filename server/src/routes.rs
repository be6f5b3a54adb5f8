use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use tracing::info;
use uibo_hunyuan::models::ChatResponse;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatTurn {
    #[serde(default)]
    message: String,
}

pub async fn health_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Relay one chatbot utterance to Hunyuan and hand the completion back.
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatTurn>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = payload.message.trim();
    if message.is_empty() {
        return Err(AppError::MissingMessage);
    }

    let client = state.hunyuan.as_ref().ok_or(AppError::MissingCredentials)?;

    let response = client.chat(message).await?;
    info!(
        request_id = response.request_id.as_deref().unwrap_or("-"),
        "chat completion relayed"
    );

    Ok(Json(response))
}
