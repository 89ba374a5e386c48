use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use warden_application::{
    DefinitionRegistry, GrantRepository, RoleMembershipRepository, SuperuserRegistry,
};
use warden_core::{AppError, AppResult};
use warden_domain::{
    AccessLevelDefinition, AccessLevelId, AccessRank, FunctionalityDefinition, FunctionalityId,
    Grant, GrantId, ObjectDefinition, ObjectId, ResolvedGrant, Role, RoleAudit, RoleId,
    RoleMembership, Subject, SuperuserMark, UserId,
};

#[derive(Debug, Default)]
struct CatalogState {
    functionalities: BTreeMap<FunctionalityId, FunctionalityDefinition>,
    objects: BTreeMap<ObjectId, ObjectDefinition>,
    access_levels: BTreeMap<AccessLevelId, AccessLevelDefinition>,
    roles: BTreeMap<RoleId, Role>,
    memberships: BTreeSet<(RoleId, UserId)>,
    grants: BTreeMap<GrantId, Grant>,
    superusers: BTreeSet<UserId>,
    next_id: i64,
}

impl CatalogState {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn resolve(&self, grant: &Grant) -> Option<ResolvedGrant> {
        self.access_levels
            .get(&grant.access_level_id)
            .map(|level| ResolvedGrant {
                grant: *grant,
                rank: level.access_level(),
            })
    }
}

/// In-memory authorization store implementing every authorization port.
///
/// Used by tests and local demos. Identifiers are allocated from a single
/// counter so ids never collide across catalogs.
#[derive(Debug, Default)]
pub struct InMemoryAuthorizationRepository {
    state: RwLock<CatalogState>,
}

impl InMemoryAuthorizationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding the baseline catalog: access levels
    /// `READ` (10), `WRITE` (20) and `DELETE` (30), the `adm` functionality
    /// with objects `admRole` and `admRoleUser`, and the `Common` role.
    pub async fn with_baseline_catalog() -> AppResult<Self> {
        let repository = Self::new();
        for (name, rank) in [("READ", 10), ("WRITE", 20), ("DELETE", 30)] {
            repository.insert_access_level(name, rank).await?;
        }
        repository.insert_functionality("adm").await?;
        repository.insert_object("admRole").await?;
        repository.insert_object("admRoleUser").await?;
        repository
            .insert_role(warden_domain::DEFAULT_ROLE_NAME, UserId::new(0))
            .await?;
        Ok(repository)
    }

    /// Registers a functionality definition.
    pub async fn insert_functionality(&self, name: &str) -> AppResult<FunctionalityId> {
        let mut state = self.state.write().await;
        if state
            .functionalities
            .values()
            .any(|value| value.name().as_str() == name)
        {
            return Err(AppError::Conflict(format!(
                "functionality '{name}' already exists"
            )));
        }

        let id = FunctionalityId::new(state.allocate_id());
        let definition = FunctionalityDefinition::new(id, name, "")?;
        state.functionalities.insert(id, definition);
        Ok(id)
    }

    /// Registers an object definition.
    pub async fn insert_object(&self, name: &str) -> AppResult<ObjectId> {
        let mut state = self.state.write().await;
        if state
            .objects
            .values()
            .any(|value| value.name().as_str() == name)
        {
            return Err(AppError::Conflict(format!("object '{name}' already exists")));
        }

        let id = ObjectId::new(state.allocate_id());
        let definition = ObjectDefinition::new(id, name, "")?;
        state.objects.insert(id, definition);
        Ok(id)
    }

    /// Registers an access level with its rank.
    pub async fn insert_access_level(&self, name: &str, rank: i32) -> AppResult<AccessLevelId> {
        let mut state = self.state.write().await;
        if state
            .access_levels
            .values()
            .any(|value| value.name().as_str() == name)
        {
            return Err(AppError::Conflict(format!(
                "access level '{name}' already exists"
            )));
        }

        let id = AccessLevelId::new(state.allocate_id());
        let definition = AccessLevelDefinition::new(id, name, AccessRank::new(rank))?;
        state.access_levels.insert(id, definition);
        Ok(id)
    }

    /// Creates a role owned by `actor`.
    pub async fn insert_role(&self, name: &str, actor: UserId) -> AppResult<RoleId> {
        let mut state = self.state.write().await;
        if state.roles.values().any(|role| role.name().as_str() == name) {
            return Err(AppError::Conflict(format!("role '{name}' already exists")));
        }

        let id = RoleId::new(state.allocate_id());
        let now = Utc::now();
        let role = Role::new(
            id,
            name,
            "",
            RoleAudit {
                created_by: actor,
                updated_by: actor,
                created_at: now,
                updated_at: now,
            },
        )?;
        state.roles.insert(id, role);
        Ok(id)
    }

    /// Stores a grant after checking that every referenced catalog entry exists.
    pub async fn insert_grant(
        &self,
        subject: Subject,
        functionality_id: FunctionalityId,
        object_id: Option<ObjectId>,
        access_level_id: AccessLevelId,
    ) -> AppResult<GrantId> {
        let mut state = self.state.write().await;
        if !state.functionalities.contains_key(&functionality_id) {
            return Err(AppError::NotFound(format!(
                "functionality '{functionality_id}' does not exist"
            )));
        }
        if let Some(object_id) = object_id
            && !state.objects.contains_key(&object_id)
        {
            return Err(AppError::NotFound(format!(
                "object '{object_id}' does not exist"
            )));
        }
        if !state.access_levels.contains_key(&access_level_id) {
            return Err(AppError::NotFound(format!(
                "access level '{access_level_id}' does not exist"
            )));
        }
        if let Subject::Role(role_id) = subject
            && !state.roles.contains_key(&role_id)
        {
            return Err(AppError::NotFound(format!("role '{role_id}' does not exist")));
        }

        let id = GrantId::new(state.allocate_id());
        state.grants.insert(
            id,
            Grant {
                id,
                subject,
                functionality_id,
                object_id,
                access_level_id,
            },
        );
        Ok(id)
    }

    /// Deletes a grant.
    pub async fn delete_grant(&self, grant_id: GrantId) -> AppResult<()> {
        if self.state.write().await.grants.remove(&grant_id).is_none() {
            return Err(AppError::NotFound(format!(
                "grant '{grant_id}' does not exist"
            )));
        }

        Ok(())
    }

    /// Provisions a superuser mark.
    pub async fn mark_superuser(&self, mark: SuperuserMark) {
        self.state.write().await.superusers.insert(mark.user_id);
    }

    /// Clears the superuser mark of a user.
    pub async fn clear_superuser(&self, user_id: UserId) {
        self.state.write().await.superusers.remove(&user_id);
    }
}

#[async_trait]
impl DefinitionRegistry for InMemoryAuthorizationRepository {
    async fn find_functionality(&self, name: &str) -> AppResult<Option<FunctionalityDefinition>> {
        Ok(self
            .state
            .read()
            .await
            .functionalities
            .values()
            .find(|value| value.name().as_str() == name)
            .cloned())
    }

    async fn find_object(&self, name: &str) -> AppResult<Option<ObjectDefinition>> {
        Ok(self
            .state
            .read()
            .await
            .objects
            .values()
            .find(|value| value.name().as_str() == name)
            .cloned())
    }

    async fn find_access_level(&self, name: &str) -> AppResult<Option<AccessLevelDefinition>> {
        Ok(self
            .state
            .read()
            .await
            .access_levels
            .values()
            .find(|value| value.name().as_str() == name)
            .cloned())
    }
}

#[async_trait]
impl GrantRepository for InMemoryAuthorizationRepository {
    async fn list_grants_for_user(&self, user_id: UserId) -> AppResult<Vec<ResolvedGrant>> {
        let state = self.state.read().await;
        Ok(state
            .grants
            .values()
            .filter(|grant| grant.subject == Subject::User(user_id))
            .filter_map(|grant| state.resolve(grant))
            .collect())
    }

    async fn list_grants_for_roles(&self, role_ids: &[RoleId]) -> AppResult<Vec<ResolvedGrant>> {
        let state = self.state.read().await;
        Ok(state
            .grants
            .values()
            .filter(|grant| {
                matches!(grant.subject, Subject::Role(role_id) if role_ids.contains(&role_id))
            })
            .filter_map(|grant| state.resolve(grant))
            .collect())
    }
}

#[async_trait]
impl RoleMembershipRepository for InMemoryAuthorizationRepository {
    async fn list_roles_for_user(&self, user_id: UserId) -> AppResult<Vec<RoleId>> {
        Ok(self
            .state
            .read()
            .await
            .memberships
            .iter()
            .filter(|(_, member)| *member == user_id)
            .map(|(role_id, _)| *role_id)
            .collect())
    }

    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>> {
        Ok(self.state.read().await.roles.get(&role_id).cloned())
    }

    async fn find_role_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        Ok(self
            .state
            .read()
            .await
            .roles
            .values()
            .find(|role| role.name().as_str() == name)
            .cloned())
    }

    async fn add_membership(&self, membership: RoleMembership) -> AppResult<()> {
        let mut state = self.state.write().await;
        if !state.roles.contains_key(&membership.role_id) {
            return Err(AppError::NotFound(format!(
                "role '{}' does not exist",
                membership.role_id
            )));
        }

        if !state
            .memberships
            .insert((membership.role_id, membership.user_id))
        {
            return Err(AppError::Conflict(format!(
                "user '{}' is already a member of role '{}'",
                membership.user_id, membership.role_id
            )));
        }

        Ok(())
    }

    async fn remove_membership(&self, membership: RoleMembership) -> AppResult<()> {
        if !self
            .state
            .write()
            .await
            .memberships
            .remove(&(membership.role_id, membership.user_id))
        {
            return Err(AppError::NotFound(format!(
                "user '{}' is not a member of role '{}'",
                membership.user_id, membership.role_id
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl SuperuserRegistry for InMemoryAuthorizationRepository {
    async fn is_superuser(&self, user_id: UserId) -> AppResult<bool> {
        Ok(self.state.read().await.superusers.contains(&user_id))
    }
}
