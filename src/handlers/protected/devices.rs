use axum::extract::{
    rejection::{JsonRejection, PathRejection},
    Extension, Json, Path, State,
};

use crate::api::devices::{CreateDeviceRequest, DeviceResponse, UpdateDeviceRequest};
use crate::handlers::{json_body, path_id};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /devices - List all devices
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<DeviceResponse>> {
    let devices = state.devices.list().await?;
    Ok(ApiResponse::success(devices.into_iter().map(DeviceResponse::from).collect()))
}

/// GET /devices/:id - Fetch one device
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<DeviceResponse> {
    let id = path_id(id, "device")?;
    let device = state.devices.get(id).await?;
    Ok(ApiResponse::success(device.into()))
}

/// POST /devices - Create a device; status defaults to "active"
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CreateDeviceRequest>, JsonRejection>,
) -> ApiResult<DeviceResponse> {
    let request = json_body(payload)?;
    request.validate()?;

    let device = state.devices.create(request.into_new_device()).await?;
    tracing::info!("User {} created device {}", user.user_id, device.id);
    Ok(ApiResponse::created(device.into()))
}

/// PUT /devices/:id - Patch the fields present in the body
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateDeviceRequest>, JsonRejection>,
) -> ApiResult<DeviceResponse> {
    let id = path_id(id, "device")?;
    let request = json_body(payload)?;
    request.validate()?;

    let device = state.devices.update(id, request.into_changes()).await?;
    tracing::info!("User {} updated device {}", user.user_id, id);
    Ok(ApiResponse::success(device.into()))
}

/// DELETE /devices/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<()> {
    let id = path_id(id, "device")?;
    state.devices.delete(id).await?;
    tracing::info!("User {} deleted device {}", user.user_id, id);
    Ok(ApiResponse::no_content())
}
