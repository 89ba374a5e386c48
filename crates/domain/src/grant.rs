//! Grant records and the subjects they target.

use serde::{Deserialize, Serialize};
use warden_core::{AppError, AppResult};

use crate::id::integer_id;
use crate::{AccessLevelId, AccessRank, FunctionalityId, ObjectId, RoleId, UserId};

integer_id! {
    /// Identifier of a grant.
    GrantId
}

/// Holder of a grant: exactly one user or exactly one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Subject {
    /// Grant held directly by a user.
    User(UserId),
    /// Grant inherited by every member of a role.
    Role(RoleId),
}

impl Subject {
    /// Builds a subject from the nullable `user_id`/`role_id` column pair.
    ///
    /// Rows with both or neither column set are corrupt storage.
    pub fn from_columns(user_id: Option<i64>, role_id: Option<i64>) -> AppResult<Self> {
        match (user_id, role_id) {
            (Some(user_id), None) => Ok(Self::User(UserId::new(user_id))),
            (None, Some(role_id)) => Ok(Self::Role(RoleId::new(role_id))),
            (Some(user_id), Some(role_id)) => Err(AppError::Internal(format!(
                "grant subject names both user '{user_id}' and role '{role_id}'"
            ))),
            (None, None) => Err(AppError::Internal(
                "grant subject names neither a user nor a role".to_owned(),
            )),
        }
    }

    /// Splits the subject back into the storage column pair.
    #[must_use]
    pub fn to_columns(&self) -> (Option<i64>, Option<i64>) {
        match self {
            Self::User(user_id) => (Some(user_id.as_i64()), None),
            Self::Role(role_id) => (None, Some(role_id.as_i64())),
        }
    }
}

/// Authorization of a subject within a functionality up to an access level.
///
/// `object_id == None` marks a functionality-wide grant. It does not answer
/// checks naming an object; those need a grant scoped to that object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grant {
    /// Stable grant id.
    pub id: GrantId,
    /// Grant holder.
    pub subject: Subject,
    /// Functionality the grant applies to.
    pub functionality_id: FunctionalityId,
    /// Optional object scope inside the functionality.
    pub object_id: Option<ObjectId>,
    /// Granted access level.
    pub access_level_id: AccessLevelId,
}

/// Grant joined with the rank of its access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedGrant {
    /// Underlying grant row.
    pub grant: Grant,
    /// Rank of `grant.access_level_id`.
    pub rank: AccessRank,
}

impl ResolvedGrant {
    /// Returns whether the grant covers `functionality_id` at `required` or above.
    ///
    /// With `object_id == None` the grant's own object scope is not consulted,
    /// so object-scoped grants also answer functionality-wide checks. With
    /// `Some(id)` only grants scoped to exactly `id` qualify.
    #[must_use]
    pub fn covers(
        &self,
        functionality_id: FunctionalityId,
        object_id: Option<ObjectId>,
        required: AccessRank,
    ) -> bool {
        if self.grant.functionality_id != functionality_id {
            return false;
        }

        if let Some(object_id) = object_id
            && self.grant.object_id != Some(object_id)
        {
            return false;
        }

        self.rank.satisfies(required)
    }
}
