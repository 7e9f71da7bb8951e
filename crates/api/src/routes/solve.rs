use crate::{error::ApiError, state::AppState};
use axum::{extract::State, Json};
use sched_core::validate;
use serde::Serialize;
use types::SolveEnvelope;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobCreated {
    pub job_id: String,
    pub status: &'static str,
}

#[utoipa::path(
        post,
        path = "/v1/solve",
        request_body = SolveEnvelope,
        responses(
            (status = 200, description = "Job enqueued", body = JobCreated),
            (status = 400, description = "Roster, grid or parameters are invalid")
        )
    )]
pub async fn solve(
    State(state): State<AppState>,
    Json(env): Json<SolveEnvelope>,
) -> Result<Json<JobCreated>, ApiError> {
    // advisories are logged by the solver when the job runs
    validate(&env)?;
    let id = state.jobs.enqueue(env);
    Ok(Json(JobCreated {
        job_id: id.0,
        status: "queued",
    }))
}
