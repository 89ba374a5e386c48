use std::sync::Arc;
use std::time::Duration;

use warden_core::AppResult;
use warden_domain::{ResolvedGrant, RoleId, UserId};

use crate::deadline::{DEFAULT_LOOKUP_TIMEOUT, with_deadline};
use crate::{GrantRepository, RoleMembershipRepository};

/// Aggregates direct and role-inherited grants into a user's effective grant set.
///
/// The superuser override is not part of this set; the decision
/// function consults it separately.
#[derive(Clone)]
pub struct PermissionResolver {
    grant_repository: Arc<dyn GrantRepository>,
    membership_repository: Arc<dyn RoleMembershipRepository>,
    lookup_timeout: Duration,
}

impl PermissionResolver {
    /// Creates a resolver over the grant and membership stores.
    #[must_use]
    pub fn new(
        grant_repository: Arc<dyn GrantRepository>,
        membership_repository: Arc<dyn RoleMembershipRepository>,
    ) -> Self {
        Self {
            grant_repository,
            membership_repository,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    /// Replaces the per-lookup deadline.
    #[must_use]
    pub fn with_lookup_timeout(mut self, lookup_timeout: Duration) -> Self {
        self.lookup_timeout = lookup_timeout;
        self
    }

    /// Returns direct grants of the user plus grants of every role it belongs to.
    pub async fn effective_grants(&self, user_id: UserId) -> AppResult<Vec<ResolvedGrant>> {
        let (mut grants, role_ids) = tokio::try_join!(
            with_deadline(
                self.lookup_timeout,
                "direct grant",
                self.grant_repository.list_grants_for_user(user_id),
            ),
            with_deadline(
                self.lookup_timeout,
                "role membership",
                self.membership_repository.list_roles_for_user(user_id),
            ),
        )?;

        let inherited = self.grants_for_roles(&role_ids).await?;

        tracing::trace!(
            user_id = %user_id,
            direct = grants.len(),
            roles = role_ids.len(),
            inherited = inherited.len(),
            "resolved effective grants"
        );

        grants.extend(inherited);
        Ok(grants)
    }

    /// Returns the grants held by a single role.
    pub async fn role_grants(&self, role_id: RoleId) -> AppResult<Vec<ResolvedGrant>> {
        self.grants_for_roles(&[role_id]).await
    }

    async fn grants_for_roles(&self, role_ids: &[RoleId]) -> AppResult<Vec<ResolvedGrant>> {
        if role_ids.is_empty() {
            return Ok(Vec::new());
        }

        with_deadline(
            self.lookup_timeout,
            "role grant",
            self.grant_repository.list_grants_for_roles(role_ids),
        )
        .await
    }
}
