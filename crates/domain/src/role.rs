use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use warden_core::{AppResult, NonEmptyString};

use crate::UserId;
use crate::id::integer_id;

/// Role every newly onboarded user joins.
pub const DEFAULT_ROLE_NAME: &str = "Common";

integer_id! {
    /// Identifier of a role.
    RoleId
}

/// Named collection of users that grants can target.
///
/// Roles are flat: a role never contains another role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    id: RoleId,
    name: NonEmptyString,
    description: String,
    created_by: UserId,
    updated_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Audit columns carried by a persisted role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleAudit {
    /// User that created the role.
    pub created_by: UserId,
    /// User that last updated the role.
    pub updated_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Creates a role with a validated name.
    pub fn new(
        id: RoleId,
        name: impl Into<String>,
        description: impl Into<String>,
        audit: RoleAudit,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            description: description.into(),
            created_by: audit.created_by,
            updated_by: audit.updated_by,
            created_at: audit.created_at,
            updated_at: audit.updated_at,
        })
    }

    /// Returns the storage identifier.
    #[must_use]
    pub fn id(&self) -> RoleId {
        self.id
    }

    /// Returns the role name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns the creating user.
    #[must_use]
    pub fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the user that last touched the role.
    #[must_use]
    pub fn updated_by(&self) -> UserId {
        self.updated_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Association between one user and one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleMembership {
    /// Member role.
    pub role_id: RoleId,
    /// Member user.
    pub user_id: UserId,
}
