use axum::response::{IntoResponse, Response};
use http::StatusCode;
use sched_core::SchedError;

#[derive(Debug)]
pub struct ApiError(pub StatusCode, pub String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

impl From<SchedError> for ApiError {
    fn from(e: SchedError) -> Self {
        let status = match e {
            SchedError::Configuration(_) => StatusCode::BAD_REQUEST,
            SchedError::InvariantViolation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError(status, e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    }
}
