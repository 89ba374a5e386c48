use serde::{Deserialize, Serialize};
use warden_core::UserIdentity;
use warden_domain::{ResolvedGrant, RoleId};

/// Health response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ready: bool,
    pub postgres: HealthDependencyStatus,
}

/// Status of one backing dependency.
#[derive(Debug, Serialize)]
pub struct HealthDependencyStatus {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Incoming payload for a permission decision.
#[derive(Debug, Deserialize)]
pub struct CheckPermissionRequest {
    pub user_id: i64,
    pub functionality: String,
    #[serde(default)]
    pub object: Option<String>,
    pub access_level: String,
}

/// Permission decision.
#[derive(Debug, Serialize)]
pub struct CheckPermissionResponse {
    pub allowed: bool,
}

/// Grants held by one role.
#[derive(Debug, Serialize)]
pub struct RolePermissionsResponse {
    pub role_id: RoleId,
    pub grants: Vec<ResolvedGrant>,
}

/// Incoming payload for a role membership write.
#[derive(Debug, Deserialize)]
pub struct RoleMembershipChangeRequest {
    pub actor: UserIdentity,
}
