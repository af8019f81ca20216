use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::jobs::reader::{list_jobs, JobRecord};
use crate::state::AppState;

/// GET /get_jobs
pub async fn handle_get_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobRecord>>, AppError> {
    let jobs = list_jobs(&state.config.jobs_csv_path).await?;
    Ok(Json(jobs))
}
