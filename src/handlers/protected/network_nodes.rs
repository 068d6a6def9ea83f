use axum::extract::{
    rejection::{JsonRejection, PathRejection},
    Extension, Json, Path, State,
};

use crate::api::devices::DeviceResponse;
use crate::api::network_nodes::{
    CreateNetworkNodeRequest, NetworkNodeResponse, TreeResponse, UpdateNetworkNodeRequest,
};
use crate::handlers::{json_body, path_id};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /network-nodes - Flat list, no children or devices
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<NetworkNodeResponse>> {
    let nodes = state.nodes.list().await?;
    Ok(ApiResponse::success(nodes.into_iter().map(NetworkNodeResponse::from).collect()))
}

/// GET /network-nodes/tree - Full nested hierarchy
pub async fn tree(State(state): State<AppState>) -> ApiResult<TreeResponse> {
    let tree = state.nodes.full_tree().await?;
    Ok(ApiResponse::success(TreeResponse { tree }))
}

/// GET /network-nodes/:id - Node with its direct children and devices
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<NetworkNodeResponse> {
    let id = path_id(id, "node")?;
    let detail = state.nodes.get(id).await?;

    let mut response = NetworkNodeResponse::from(detail.node);
    response.children = detail.children.into_iter().map(NetworkNodeResponse::from).collect();
    response.devices = detail.devices.into_iter().map(DeviceResponse::from).collect();
    Ok(ApiResponse::success(response))
}

/// POST /network-nodes
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CreateNetworkNodeRequest>, JsonRejection>,
) -> ApiResult<NetworkNodeResponse> {
    let request = json_body(payload)?;
    request.validate()?;

    let node = state.nodes.create(request.into_new_node()).await?;
    tracing::info!("User {} created network node {}", user.user_id, node.id);
    Ok(ApiResponse::created(node.into()))
}

/// PUT /network-nodes/:id - Patch the fields present in the body
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateNetworkNodeRequest>, JsonRejection>,
) -> ApiResult<NetworkNodeResponse> {
    let id = path_id(id, "node")?;
    let request = json_body(payload)?;
    request.validate()?;

    let node = state.nodes.update(id, request.into_changes()).await?;
    tracing::info!("User {} updated network node {}", user.user_id, id);
    Ok(ApiResponse::success(node.into()))
}

/// DELETE /network-nodes/:id - Detach devices, promote children, delete
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<()> {
    let id = path_id(id, "node")?;
    state.nodes.delete(id).await?;
    tracing::info!("User {} deleted network node {}", user.user_id, id);
    Ok(ApiResponse::no_content())
}
