use async_trait::async_trait;

use warden_core::AppResult;
use warden_domain::{
    AccessLevelDefinition, FunctionalityDefinition, ObjectDefinition, ResolvedGrant, Role, RoleId,
    RoleMembership, UserId,
};

/// Read-only lookup of the definition catalogs by unique name.
///
/// A missing name is `Ok(None)`; only store failures are errors.
#[async_trait]
pub trait DefinitionRegistry: Send + Sync {
    /// Finds a functionality definition by name.
    async fn find_functionality(&self, name: &str) -> AppResult<Option<FunctionalityDefinition>>;

    /// Finds an object definition by name.
    async fn find_object(&self, name: &str) -> AppResult<Option<ObjectDefinition>>;

    /// Finds an access level definition by name.
    async fn find_access_level(&self, name: &str) -> AppResult<Option<AccessLevelDefinition>>;
}

/// Repository port for grant lookups.
#[async_trait]
pub trait GrantRepository: Send + Sync {
    /// Lists grants held directly by a user, joined with their access rank.
    async fn list_grants_for_user(&self, user_id: UserId) -> AppResult<Vec<ResolvedGrant>>;

    /// Lists grants held by any of the given roles, joined with their access rank.
    async fn list_grants_for_roles(&self, role_ids: &[RoleId]) -> AppResult<Vec<ResolvedGrant>>;
}

/// Repository port for user to role associations.
#[async_trait]
pub trait RoleMembershipRepository: Send + Sync {
    /// Lists the roles a user belongs to.
    async fn list_roles_for_user(&self, user_id: UserId) -> AppResult<Vec<RoleId>>;

    /// Finds a role by id.
    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>>;

    /// Finds a role by name.
    async fn find_role_by_name(&self, name: &str) -> AppResult<Option<Role>>;

    /// Adds a membership. Fails with `Conflict` when the pair already exists.
    async fn add_membership(&self, membership: RoleMembership) -> AppResult<()>;

    /// Removes a membership. Fails with `NotFound` when the pair does not exist.
    async fn remove_membership(&self, membership: RoleMembership) -> AppResult<()>;
}

/// Lookup of users holding the superuser override.
#[async_trait]
pub trait SuperuserRegistry: Send + Sync {
    /// Returns whether the user carries a superuser mark.
    async fn is_superuser(&self, user_id: UserId) -> AppResult<bool>;
}
