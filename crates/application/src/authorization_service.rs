use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};
use warden_core::{AppError, AppResult, UserIdentity};
use warden_domain::{
    AccessRank, AccessRequest, FunctionalityId, ObjectId, ResolvedGrant, RoleId, UserId,
};

use crate::deadline::{DEFAULT_LOOKUP_TIMEOUT, with_deadline};
use crate::{
    DefinitionRegistry, GrantRepository, PermissionResolver, RoleMembershipRepository,
    SuperuserRegistry,
};

/// Effective permission listing for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionSummary {
    /// Listed user.
    pub user_id: UserId,
    /// Whether the user holds the superuser override.
    pub superuser: bool,
    /// Direct and role-inherited grants.
    pub grants: Vec<ResolvedGrant>,
}

/// Request names resolved to catalog ids and ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ResolvedRequest {
    functionality_id: FunctionalityId,
    object_id: Option<ObjectId>,
    required: AccessRank,
}

/// Which catalog lookup failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnresolvedReference {
    Functionality,
    Object,
    AccessLevel,
}

impl UnresolvedReference {
    fn as_str(self) -> &'static str {
        match self {
            Self::Functionality => "functionality",
            Self::Object => "object",
            Self::AccessLevel => "access_level",
        }
    }
}

/// Application service answering permission checks for every other subsystem.
#[derive(Clone)]
pub struct AuthorizationService {
    definition_registry: Arc<dyn DefinitionRegistry>,
    superuser_registry: Arc<dyn SuperuserRegistry>,
    resolver: PermissionResolver,
    lookup_timeout: Duration,
}

impl AuthorizationService {
    /// Creates a new authorization service from the store ports.
    #[must_use]
    pub fn new(
        definition_registry: Arc<dyn DefinitionRegistry>,
        grant_repository: Arc<dyn GrantRepository>,
        membership_repository: Arc<dyn RoleMembershipRepository>,
        superuser_registry: Arc<dyn SuperuserRegistry>,
    ) -> Self {
        Self {
            definition_registry,
            superuser_registry,
            resolver: PermissionResolver::new(grant_repository, membership_repository),
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    /// Bounds every individual store lookup by `lookup_timeout`.
    #[must_use]
    pub fn with_lookup_timeout(mut self, lookup_timeout: Duration) -> Self {
        self.resolver = self.resolver.with_lookup_timeout(lookup_timeout);
        self.lookup_timeout = lookup_timeout;
        self
    }

    /// Returns whether the user may perform the requested capability.
    ///
    /// Unknown functionality, object or access level names deny, even for
    /// superusers. Store failures are returned as errors, not as denials.
    pub async fn check_permission(
        &self,
        user_id: UserId,
        request: &AccessRequest,
    ) -> AppResult<bool> {
        let resolved = match self.resolve_request(request).await {
            Ok(Ok(resolved)) => resolved,
            Ok(Err(missing)) => {
                debug!(
                    user_id = %user_id,
                    request = %request,
                    missing = missing.as_str(),
                    "permission denied: unresolved reference"
                );
                return Ok(false);
            }
            Err(error) => {
                warn!(
                    user_id = %user_id,
                    request = %request,
                    error = %error,
                    "definition lookup failed"
                );
                return Err(error);
            }
        };

        let lookups = tokio::try_join!(
            self.resolver.effective_grants(user_id),
            with_deadline(
                self.lookup_timeout,
                "superuser",
                self.superuser_registry.is_superuser(user_id),
            ),
        );
        let (grants, is_superuser) = match lookups {
            Ok(values) => values,
            Err(error) => {
                warn!(
                    user_id = %user_id,
                    request = %request,
                    error = %error,
                    "grant lookup failed"
                );
                return Err(error);
            }
        };

        if is_superuser {
            debug!(user_id = %user_id, request = %request, "permission granted: superuser");
            return Ok(true);
        }

        let allowed = grants.iter().any(|grant| {
            grant.covers(
                resolved.functionality_id,
                resolved.object_id,
                resolved.required,
            )
        });

        debug!(
            user_id = %user_id,
            request = %request,
            grants = grants.len(),
            allowed,
            "permission evaluated"
        );

        Ok(allowed)
    }

    /// Same as [`Self::check_permission`] for an authenticated identity.
    pub async fn check_permission_for(
        &self,
        actor: &UserIdentity,
        request: &AccessRequest,
    ) -> AppResult<bool> {
        self.check_permission(UserId::from(actor), request).await
    }

    /// Ensures the user may perform the requested capability.
    pub async fn require_permission(
        &self,
        user_id: UserId,
        request: &AccessRequest,
    ) -> AppResult<()> {
        if self.check_permission(user_id, request).await? {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "user '{user_id}' is missing permission '{request}'"
        )))
    }

    /// Lists the effective grants of a user together with the superuser flag.
    pub async fn user_permissions(&self, user_id: UserId) -> AppResult<PermissionSummary> {
        let (grants, superuser) = tokio::try_join!(
            self.resolver.effective_grants(user_id),
            with_deadline(
                self.lookup_timeout,
                "superuser",
                self.superuser_registry.is_superuser(user_id),
            ),
        )?;

        Ok(PermissionSummary {
            user_id,
            superuser,
            grants,
        })
    }

    /// Lists the grants held by a role.
    pub async fn role_permissions(&self, role_id: RoleId) -> AppResult<Vec<ResolvedGrant>> {
        self.resolver.role_grants(role_id).await
    }

    /// Resolves request names. The inner `Err` names the first lookup that missed.
    async fn resolve_request(
        &self,
        request: &AccessRequest,
    ) -> AppResult<Result<ResolvedRequest, UnresolvedReference>> {
        let object_lookup = async {
            match request.object() {
                Some(name) => with_deadline(
                    self.lookup_timeout,
                    "object definition",
                    self.definition_registry.find_object(name),
                )
                .await
                .map(Some),
                None => Ok(None),
            }
        };

        let (functionality, object, access_level) = tokio::try_join!(
            with_deadline(
                self.lookup_timeout,
                "functionality definition",
                self.definition_registry
                    .find_functionality(request.functionality()),
            ),
            object_lookup,
            with_deadline(
                self.lookup_timeout,
                "access level definition",
                self.definition_registry
                    .find_access_level(request.access_level()),
            ),
        )?;

        let Some(functionality) = functionality else {
            return Ok(Err(UnresolvedReference::Functionality));
        };

        let object_id = match object {
            Some(Some(object)) => Some(object.id()),
            Some(None) => return Ok(Err(UnresolvedReference::Object)),
            None => None,
        };

        let Some(access_level) = access_level else {
            return Ok(Err(UnresolvedReference::AccessLevel));
        };

        Ok(Ok(ResolvedRequest {
            functionality_id: functionality.id(),
            object_id,
            required: access_level.access_level(),
        }))
    }
}
