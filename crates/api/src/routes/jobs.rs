use crate::{error::ApiError, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use types::SolveResult;

#[utoipa::path(
        get,
        path = "/v1/jobs/{id}",
        params(("id" = String, Path, description = "Job ID")),
        responses((status = 200, description = "Job status", body = jobs::JobStatus))
    )]
pub async fn status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let st = state.jobs.get(&id);
    Ok(Json(match st {
        None => serde_json::json!({"status": "not_found"}),
        Some(s) => serde_json::to_value(s)?,
    }))
}

#[utoipa::path(
        get,
        path = "/v1/jobs/{id}/result",
        params(("id" = String, Path, description = "Job ID")),
        responses(
            (status = 200, description = "Timetable (if ready)", body = SolveResult)
        )
    )]
pub async fn result(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let st = state.jobs.get(&id);
    Ok(Json(match st {
        Some(jobs::JobStatus::Solved { result }) => serde_json::to_value(result)?,
        Some(jobs::JobStatus::Failed { message }) => {
            serde_json::json!({"status": "failed", "message": message})
        }
        Some(_) => serde_json::json!({"status": "not_ready"}),
        None => serde_json::json!({"status": "not_found"}),
    }))
}
