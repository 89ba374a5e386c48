use std::sync::Arc;

use tracing::info;
use warden_core::{AppError, AppResult, UserIdentity};
use warden_domain::{AccessRequest, DEFAULT_ROLE_NAME, RoleId, RoleMembership, UserId};

use crate::{AuthorizationService, RoleMembershipRepository};

/// Functionality guarding administrative operations.
pub const ADMIN_FUNCTIONALITY: &str = "adm";

/// Object guarding role membership administration.
pub const ROLE_MEMBERSHIP_OBJECT: &str = "admRoleUser";

/// Application service for role membership writes.
#[derive(Clone)]
pub struct MembershipService {
    authorization_service: AuthorizationService,
    repository: Arc<dyn RoleMembershipRepository>,
}

impl MembershipService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        repository: Arc<dyn RoleMembershipRepository>,
    ) -> Self {
        Self {
            authorization_service,
            repository,
        }
    }

    /// Adds a freshly onboarded user to the default role.
    pub async fn assign_default_role(&self, user_id: UserId) -> AppResult<RoleMembership> {
        let role = self
            .repository
            .find_role_by_name(DEFAULT_ROLE_NAME)
            .await?
            .ok_or_else(|| {
                AppError::Unavailable(format!("default role '{DEFAULT_ROLE_NAME}' was not found"))
            })?;

        let membership = RoleMembership {
            role_id: role.id(),
            user_id,
        };
        self.repository.add_membership(membership).await?;

        info!(user_id = %user_id, role_id = %role.id(), "default role assigned");
        Ok(membership)
    }

    /// Adds a user to a role on behalf of an administrator.
    pub async fn assign_role(
        &self,
        actor: &UserIdentity,
        role_id: RoleId,
        user_id: UserId,
    ) -> AppResult<RoleMembership> {
        self.authorize(actor, "WRITE").await?;
        self.ensure_role_exists(role_id).await?;

        let membership = RoleMembership { role_id, user_id };
        self.repository.add_membership(membership).await?;

        info!(
            actor = %actor.user_id(),
            role_id = %role_id,
            user_id = %user_id,
            "role assigned"
        );
        Ok(membership)
    }

    /// Removes a user from a role on behalf of an administrator.
    pub async fn unassign_role(
        &self,
        actor: &UserIdentity,
        role_id: RoleId,
        user_id: UserId,
    ) -> AppResult<()> {
        self.authorize(actor, "DELETE").await?;

        self.repository
            .remove_membership(RoleMembership { role_id, user_id })
            .await?;

        info!(
            actor = %actor.user_id(),
            role_id = %role_id,
            user_id = %user_id,
            "role unassigned"
        );
        Ok(())
    }

    async fn authorize(&self, actor: &UserIdentity, access_level: &str) -> AppResult<()> {
        let request =
            AccessRequest::scoped(ADMIN_FUNCTIONALITY, ROLE_MEMBERSHIP_OBJECT, access_level);
        self.authorization_service
            .require_permission(UserId::from(actor), &request)
            .await
    }

    async fn ensure_role_exists(&self, role_id: RoleId) -> AppResult<()> {
        if self.repository.find_role(role_id).await?.is_none() {
            return Err(AppError::NotFound(format!("role '{role_id}' was not found")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
