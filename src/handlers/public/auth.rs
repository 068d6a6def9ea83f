use axum::extract::{rejection::JsonRejection, Json, State};

use crate::api::auth::{LoginRequest, LoginResponse};
use crate::handlers::json_body;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /login - Exchange login + password for a signed token
///
/// Expected Input:
/// ```json
/// { "login": "admin", "password": "admin123" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// { "token": "eyJhbGciOiJIUzI1NiI...", "role": "admin" }
/// ```
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let request = json_body(payload)?;
    request.validate()?;

    let outcome = state.auth.login(&request.login, &request.password).await?;
    Ok(ApiResponse::success(LoginResponse {
        token: outcome.token,
        role: outcome.role,
    }))
}
