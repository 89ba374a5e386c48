use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use warden_core::{AppError, AppResult};
use warden_domain::{
    AccessLevelDefinition, AccessLevelId, AccessRank, FunctionalityDefinition, FunctionalityId,
    Grant, GrantId, ObjectDefinition, ObjectId, ResolvedGrant, Role, RoleAudit, RoleId,
    RoleMembership, Subject, UserId,
};

use crate::{
    AuthorizationService, DefinitionRegistry, GrantRepository, RoleMembershipRepository,
    SuperuserRegistry,
};

#[derive(Default)]
struct FakeState {
    functionalities: Vec<FunctionalityDefinition>,
    objects: Vec<ObjectDefinition>,
    access_levels: Vec<AccessLevelDefinition>,
    roles: Vec<Role>,
    memberships: Vec<RoleMembership>,
    grants: Vec<Grant>,
    superusers: HashSet<UserId>,
}

/// Port of the fake store that can be taken offline on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FakePort {
    Definitions,
    Grants,
    Memberships,
    Superusers,
}

impl FakePort {
    const ALL: [Self; 4] = [
        Self::Definitions,
        Self::Grants,
        Self::Memberships,
        Self::Superusers,
    ];

    fn index(self) -> usize {
        match self {
            Self::Definitions => 0,
            Self::Grants => 1,
            Self::Memberships => 2,
            Self::Superusers => 3,
        }
    }
}

/// Single fake backing every authorization port.
#[derive(Default)]
pub(crate) struct FakeStore {
    state: RwLock<FakeState>,
    offline: [AtomicBool; 4],
    grant_delay: RwLock<Option<Duration>>,
}

impl FakeStore {
    /// READ=10, WRITE=20, DELETE=30; `adm` and `equ`; objects `admRole` and
    /// `admRoleUser`; role 7 `Common`.
    pub(crate) async fn seeded() -> Arc<Self> {
        let store = Arc::new(Self::default());
        {
            let mut state = store.state.write().await;
            for (id, name, rank) in [(1, "READ", 10), (2, "WRITE", 20), (3, "DELETE", 30)] {
                if let Ok(level) =
                    AccessLevelDefinition::new(AccessLevelId::new(id), name, AccessRank::new(rank))
                {
                    state.access_levels.push(level);
                }
            }
            for (id, name) in [(1, "adm"), (2, "equ")] {
                if let Ok(functionality) =
                    FunctionalityDefinition::new(FunctionalityId::new(id), name, "")
                {
                    state.functionalities.push(functionality);
                }
            }
            for (id, name) in [(1, "admRole"), (2, "admRoleUser")] {
                if let Ok(object) = ObjectDefinition::new(ObjectId::new(id), name, "") {
                    state.objects.push(object);
                }
            }
        }
        store.add_role(7, "Common").await;
        store
    }

    pub(crate) async fn add_access_level(&self, id: i64, name: &str, rank: i32) {
        if let Ok(level) =
            AccessLevelDefinition::new(AccessLevelId::new(id), name, AccessRank::new(rank))
        {
            self.state.write().await.access_levels.push(level);
        }
    }

    pub(crate) async fn add_role(&self, id: i64, name: &str) {
        let now = Utc::now();
        let audit = RoleAudit {
            created_by: UserId::new(1),
            updated_by: UserId::new(1),
            created_at: now,
            updated_at: now,
        };
        if let Ok(role) = Role::new(RoleId::new(id), name, "", audit) {
            self.state.write().await.roles.push(role);
        }
    }

    pub(crate) async fn add_member(&self, role_id: i64, user_id: i64) {
        self.state.write().await.memberships.push(RoleMembership {
            role_id: RoleId::new(role_id),
            user_id: UserId::new(user_id),
        });
    }

    pub(crate) async fn add_superuser(&self, user_id: i64) {
        self.state
            .write()
            .await
            .superusers
            .insert(UserId::new(user_id));
    }

    /// Adds a grant by catalog names. Returns `None` when a name is unknown.
    pub(crate) async fn add_grant(
        &self,
        subject: Subject,
        functionality: &str,
        object: Option<&str>,
        access_level: &str,
    ) -> Option<GrantId> {
        let mut state = self.state.write().await;
        let functionality_id = state
            .functionalities
            .iter()
            .find(|value| value.name().as_str() == functionality)?
            .id();
        let object_id = match object {
            Some(name) => Some(
                state
                    .objects
                    .iter()
                    .find(|value| value.name().as_str() == name)?
                    .id(),
            ),
            None => None,
        };
        let access_level_id = state
            .access_levels
            .iter()
            .find(|value| value.name().as_str() == access_level)?
            .id();

        let id = GrantId::new(i64::try_from(state.grants.len()).unwrap_or(i64::MAX) + 1);
        state.grants.push(Grant {
            id,
            subject,
            functionality_id,
            object_id,
            access_level_id,
        });
        Some(id)
    }

    pub(crate) async fn revoke_grant(&self, grant_id: GrantId) {
        self.state
            .write()
            .await
            .grants
            .retain(|grant| grant.id != grant_id);
    }

    pub(crate) async fn membership_count(&self) -> usize {
        self.state.read().await.memberships.len()
    }

    pub(crate) fn set_unavailable(&self, unavailable: bool) {
        for port in FakePort::ALL {
            self.set_port_unavailable(port, unavailable);
        }
    }

    pub(crate) fn set_port_unavailable(&self, port: FakePort, unavailable: bool) {
        self.offline[port.index()].store(unavailable, Ordering::SeqCst);
    }

    pub(crate) async fn set_grant_delay(&self, delay: Duration) {
        *self.grant_delay.write().await = Some(delay);
    }

    fn ensure_available(&self, port: FakePort) -> AppResult<()> {
        if self.offline[port.index()].load(Ordering::SeqCst) {
            return Err(AppError::Unavailable(format!(
                "fake {port:?} store is offline"
            )));
        }

        Ok(())
    }

    async fn resolve(&self, filter: impl Fn(&Subject) -> bool) -> AppResult<Vec<ResolvedGrant>> {
        self.ensure_available(FakePort::Grants)?;
        if let Some(delay) = *self.grant_delay.read().await {
            tokio::time::sleep(delay).await;
        }

        let state = self.state.read().await;
        Ok(state
            .grants
            .iter()
            .filter(|grant| filter(&grant.subject))
            .filter_map(|grant| {
                state
                    .access_levels
                    .iter()
                    .find(|level| level.id() == grant.access_level_id)
                    .map(|level| ResolvedGrant {
                        grant: *grant,
                        rank: level.access_level(),
                    })
            })
            .collect())
    }
}

#[async_trait]
impl DefinitionRegistry for FakeStore {
    async fn find_functionality(&self, name: &str) -> AppResult<Option<FunctionalityDefinition>> {
        self.ensure_available(FakePort::Definitions)?;
        Ok(self
            .state
            .read()
            .await
            .functionalities
            .iter()
            .find(|value| value.name().as_str() == name)
            .cloned())
    }

    async fn find_object(&self, name: &str) -> AppResult<Option<ObjectDefinition>> {
        self.ensure_available(FakePort::Definitions)?;
        Ok(self
            .state
            .read()
            .await
            .objects
            .iter()
            .find(|value| value.name().as_str() == name)
            .cloned())
    }

    async fn find_access_level(&self, name: &str) -> AppResult<Option<AccessLevelDefinition>> {
        self.ensure_available(FakePort::Definitions)?;
        Ok(self
            .state
            .read()
            .await
            .access_levels
            .iter()
            .find(|value| value.name().as_str() == name)
            .cloned())
    }
}

#[async_trait]
impl GrantRepository for FakeStore {
    async fn list_grants_for_user(&self, user_id: UserId) -> AppResult<Vec<ResolvedGrant>> {
        self.resolve(|subject| subject == &Subject::User(user_id))
            .await
    }

    async fn list_grants_for_roles(&self, role_ids: &[RoleId]) -> AppResult<Vec<ResolvedGrant>> {
        self.resolve(|subject| matches!(subject, Subject::Role(role_id) if role_ids.contains(role_id)))
            .await
    }
}

#[async_trait]
impl RoleMembershipRepository for FakeStore {
    async fn list_roles_for_user(&self, user_id: UserId) -> AppResult<Vec<RoleId>> {
        self.ensure_available(FakePort::Memberships)?;
        Ok(self
            .state
            .read()
            .await
            .memberships
            .iter()
            .filter(|membership| membership.user_id == user_id)
            .map(|membership| membership.role_id)
            .collect())
    }

    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>> {
        self.ensure_available(FakePort::Memberships)?;
        Ok(self
            .state
            .read()
            .await
            .roles
            .iter()
            .find(|role| role.id() == role_id)
            .cloned())
    }

    async fn find_role_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        self.ensure_available(FakePort::Memberships)?;
        Ok(self
            .state
            .read()
            .await
            .roles
            .iter()
            .find(|role| role.name().as_str() == name)
            .cloned())
    }

    async fn add_membership(&self, membership: RoleMembership) -> AppResult<()> {
        self.ensure_available(FakePort::Memberships)?;
        let mut state = self.state.write().await;
        if state.memberships.contains(&membership) {
            return Err(AppError::Conflict(format!(
                "user '{}' is already a member of role '{}'",
                membership.user_id, membership.role_id
            )));
        }

        state.memberships.push(membership);
        Ok(())
    }

    async fn remove_membership(&self, membership: RoleMembership) -> AppResult<()> {
        self.ensure_available(FakePort::Memberships)?;
        let mut state = self.state.write().await;
        let before = state.memberships.len();
        state.memberships.retain(|value| value != &membership);
        if state.memberships.len() == before {
            return Err(AppError::NotFound(format!(
                "user '{}' is not a member of role '{}'",
                membership.user_id, membership.role_id
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl SuperuserRegistry for FakeStore {
    async fn is_superuser(&self, user_id: UserId) -> AppResult<bool> {
        self.ensure_available(FakePort::Superusers)?;
        Ok(self.state.read().await.superusers.contains(&user_id))
    }
}

pub(crate) fn authorization_service(store: &Arc<FakeStore>) -> AuthorizationService {
    AuthorizationService::new(store.clone(), store.clone(), store.clone(), store.clone())
}
