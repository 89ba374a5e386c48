use axum::Json;
use axum::extract::{Path, State};
use tracing::debug;
use warden_application::PermissionSummary;
use warden_domain::{AccessRequest, RoleId, UserId};

use crate::dto::{CheckPermissionRequest, CheckPermissionResponse, RolePermissionsResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// Answers whether a user may perform a capability.
pub async fn check_permission_handler(
    State(state): State<AppState>,
    Json(payload): Json<CheckPermissionRequest>,
) -> ApiResult<Json<CheckPermissionResponse>> {
    let user_id = UserId::new(payload.user_id);
    let request = AccessRequest::new(
        payload.functionality,
        payload.object,
        payload.access_level,
    );

    let allowed = state
        .authorization_service
        .check_permission(user_id, &request)
        .await?;

    debug!(user_id = %user_id, request = %request, allowed, "permission check answered");

    Ok(Json(CheckPermissionResponse { allowed }))
}

/// Lists a user's direct and role-inherited grants.
pub async fn user_permissions_handler(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<PermissionSummary>> {
    let summary = state
        .authorization_service
        .user_permissions(UserId::new(user_id))
        .await?;

    Ok(Json(summary))
}

/// Lists the grants held by a role.
pub async fn role_permissions_handler(
    State(state): State<AppState>,
    Path(role_id): Path<i64>,
) -> ApiResult<Json<RolePermissionsResponse>> {
    let role_id = RoleId::new(role_id);
    let grants = state
        .authorization_service
        .role_permissions(role_id)
        .await?;

    Ok(Json(RolePermissionsResponse { role_id, grants }))
}
