use axum::Json;
use sched_core::{validate, SchedError};
use serde::Serialize;
use types::SolveEnvelope;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct ValidationReport {
    pub ok: bool,
    #[serde(default)]
    pub errors: Vec<String>,
    /// Advisory findings that do not prevent a run.
    #[serde(default)]
    pub warnings: Vec<String>,
}

#[utoipa::path(
    post,
    path = "/v1/validate",
    request_body = SolveEnvelope,
    responses(
    (status = 200, description = "Validation result", body = ValidationReport)
    )
)]
pub async fn validate_handler(Json(env): Json<SolveEnvelope>) -> Json<ValidationReport> {
    Json(match validate(&env) {
        Ok(problem) => ValidationReport {
            ok: true,
            errors: vec![],
            warnings: problem.advisories(),
        },
        Err(SchedError::Configuration(errors)) => ValidationReport {
            ok: false,
            errors,
            warnings: vec![],
        },
        Err(other) => ValidationReport {
            ok: false,
            errors: vec![other.to_string()],
            warnings: vec![],
        },
    })
}
