//! Axum route handler for the role prediction API.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::prediction::video_links::VideoLinkTable;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// Items are checked by the predictor; non-strings yield the fallback pair.
    pub skills: Option<Vec<Value>>,
    pub interest: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RolePrediction {
    pub role: String,
    pub video_links: [String; 2],
}

/// POST /predict
///
/// Returns one entry per predicted role, each with two reference videos.
/// Prediction failures fall back to a fixed role pair; only a malformed body
/// or a crashed inference task produces a 500.
pub async fn handle_predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<Vec<RolePrediction>>, AppError> {
    let Json(request) = payload.map_err(|e| anyhow::anyhow!("invalid predict body: {e}"))?;

    let skills = request.skills.unwrap_or_default();
    let interest = request.interest.unwrap_or_default();
    if skills.is_empty() || interest.is_empty() {
        return Err(AppError::Validation("Missing skills or interest".to_string()));
    }

    let predictor = Arc::clone(&state.predictor);
    let roles = tokio::task::spawn_blocking(move || {
        predictor.predict_json_or_fallback(&skills, &interest)
    })
    .await
    .map_err(anyhow::Error::from)?;

    info!("Predicted roles: {}", roles.join(", "));

    let table = VideoLinkTable::standard();
    let results = roles
        .into_iter()
        .map(|role| RolePrediction {
            video_links: table.resolve(&role),
            role,
        })
        .collect();

    Ok(Json(results))
}
