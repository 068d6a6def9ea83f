// handlers/mod.rs - HTTP handlers grouped by access level
//
// public:    no token (login, health)
// protected: bearer token; write routes additionally require the admin role

pub mod protected;
pub mod public;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path};

use crate::error::ApiError;

/// Unwrap a JSON body, turning bind failures into a 400
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| {
            tracing::debug!("Rejected request body: {}", rejection.body_text());
            ApiError::invalid_json("Invalid request data")
        })
}

/// Unwrap a numeric `:id` path segment
pub(crate) fn path_id(path: Result<Path<i64>, PathRejection>, entity: &str) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::bad_request(format!("Invalid {} ID", entity)))
}
