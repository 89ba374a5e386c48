//! Read-only catalogs the engine resolves request names against.

use serde::{Deserialize, Serialize};
use warden_core::{AppResult, NonEmptyString};

use crate::id::integer_id;

integer_id! {
    /// Identifier of a functionality definition.
    FunctionalityId
}

integer_id! {
    /// Identifier of an object definition.
    ObjectId
}

integer_id! {
    /// Identifier of an access level definition.
    AccessLevelId
}

/// Integer rank of an access level. Higher rank means more access.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AccessRank(i32);

impl AccessRank {
    /// Wraps a raw rank value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the raw rank value.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }

    /// Returns whether this rank is at least the `required` rank.
    #[must_use]
    pub fn satisfies(&self, required: AccessRank) -> bool {
        *self >= required
    }
}

/// Named subsystem a grant applies to, for example `adm` or `equ`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionalityDefinition {
    id: FunctionalityId,
    name: NonEmptyString,
    description: String,
}

impl FunctionalityDefinition {
    /// Creates a functionality definition with a validated name.
    pub fn new(
        id: FunctionalityId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            description: description.into(),
        })
    }

    /// Returns the storage identifier.
    #[must_use]
    pub fn id(&self) -> FunctionalityId {
        self.id
    }

    /// Returns the unique name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

/// Named sub-resource inside a functionality, for example `admRole`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDefinition {
    id: ObjectId,
    name: NonEmptyString,
    description: String,
}

impl ObjectDefinition {
    /// Creates an object definition with a validated name.
    pub fn new(
        id: ObjectId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            description: description.into(),
        })
    }

    /// Returns the storage identifier.
    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Returns the unique name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

/// Named access level such as `READ`, `WRITE` or `DELETE` with its rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessLevelDefinition {
    id: AccessLevelId,
    name: NonEmptyString,
    access_level: AccessRank,
}

impl AccessLevelDefinition {
    /// Creates an access level definition with a validated name.
    pub fn new(
        id: AccessLevelId,
        name: impl Into<String>,
        access_level: AccessRank,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            access_level,
        })
    }

    /// Returns the storage identifier.
    #[must_use]
    pub fn id(&self) -> AccessLevelId {
        self.id
    }

    /// Returns the unique name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the rank compared during permission checks.
    #[must_use]
    pub fn access_level(&self) -> AccessRank {
        self.access_level
    }
}
