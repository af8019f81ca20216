//! Static page renders. Templates are served as-is and read on each request.

use std::path::Path;

use anyhow::Context;
use axum::{extract::State, response::Html};

use crate::errors::AppError;
use crate::state::AppState;

async fn render_page(templates_dir: &Path, name: &str) -> Result<Html<String>, AppError> {
    let path = templates_dir.join(name);
    let page = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read template {}", path.display()))?;
    Ok(Html(page))
}

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render_page(&state.config.templates_dir, "index.html").await
}

/// GET /chat
pub async fn handle_chat_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render_page(&state.config.templates_dir, "chat.html").await
}

/// GET /jobs
pub async fn handle_jobs_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render_page(&state.config.templates_dir, "jobs.html").await
}
