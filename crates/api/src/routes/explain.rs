use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use sched_core::{export, scoring, Grid, Roster};
use types::{Clash, GridShape, RosterSpec, SolveStatus, TimetableRow};

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExplainIn {
    pub roster: RosterSpec,
    pub grid: GridShape,
    pub rows: Vec<TimetableRow>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExplainOut {
    pub status: SolveStatus,
    pub fitness: u32,
    pub clashes: Vec<Clash>,
}

#[utoipa::path(
    post,
    path = "/v1/explain",
    request_body = ExplainIn,
    responses(
    (status = 200, description = "Clash breakdown for the provided timetable", body = ExplainOut),
    (status = 400, description = "Rows do not match the roster or grid")
    )
)]
pub async fn explain(Json(input): Json<ExplainIn>) -> Result<Json<ExplainOut>, ApiError> {
    let roster = Roster::from_spec(&input.roster)?;
    let grid = Grid::new(input.grid)?;
    let candidate = export::from_rows(&input.rows, &roster, &grid)?;

    let fitness = scoring::evaluate(candidate.cells(), grid.num_sections());
    Ok(Json(ExplainOut {
        status: if fitness == 0 {
            SolveStatus::Feasible
        } else {
            SolveStatus::Conflicted
        },
        fitness,
        clashes: scoring::clash_report(&candidate, &roster, &grid),
    }))
}
