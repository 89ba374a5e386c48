use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use warden_domain::{RoleId, RoleMembership, UserId};

use crate::dto::RoleMembershipChangeRequest;
use crate::error::ApiResult;
use crate::state::AppState;

/// Adds a user to a role on behalf of the acting administrator.
pub async fn assign_role_handler(
    State(state): State<AppState>,
    Path((role_id, user_id)): Path<(i64, i64)>,
    Json(payload): Json<RoleMembershipChangeRequest>,
) -> ApiResult<(StatusCode, Json<RoleMembership>)> {
    let membership = state
        .membership_service
        .assign_role(&payload.actor, RoleId::new(role_id), UserId::new(user_id))
        .await?;

    Ok((StatusCode::CREATED, Json(membership)))
}

/// Removes a user from a role on behalf of the acting administrator.
pub async fn unassign_role_handler(
    State(state): State<AppState>,
    Path((role_id, user_id)): Path<(i64, i64)>,
    Json(payload): Json<RoleMembershipChangeRequest>,
) -> ApiResult<StatusCode> {
    state
        .membership_service
        .unassign_role(&payload.actor, RoleId::new(role_id), UserId::new(user_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Puts a newly onboarded user into the default role.
pub async fn assign_default_role_handler(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<(StatusCode, Json<RoleMembership>)> {
    let membership = state
        .membership_service
        .assign_default_role(UserId::new(user_id))
        .await?;

    Ok((StatusCode::CREATED, Json(membership)))
}
