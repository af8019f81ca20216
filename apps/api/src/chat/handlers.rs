use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::chat::ask;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /api
///
/// Any failure, including an unreadable body, is returned as its error text.
pub async fn handle_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Chat(e.body_text()))?;

    let message = request.message.unwrap_or_default();
    if message.is_empty() {
        return Err(AppError::Validation("Please enter a message".to_string()));
    }

    let response = ask(state.chat.as_ref(), &message)
        .await
        .map_err(|e| AppError::Chat(e.to_string()))?;

    Ok(Json(ChatResponse { response }))
}
