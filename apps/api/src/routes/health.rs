use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version and the size of the loaded model.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let artifact = state.predictor.artifact();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "roles": artifact.label_encoder.len(),
        "threshold": state.predictor.threshold(),
    }))
}
