//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod access;
mod definition;
mod grant;
mod id;
mod role;
mod user;

pub use access::AccessRequest;
pub use definition::{
    AccessLevelDefinition, AccessLevelId, AccessRank, FunctionalityDefinition, FunctionalityId,
    ObjectDefinition, ObjectId,
};
pub use grant::{Grant, GrantId, ResolvedGrant, Subject};
pub use role::{DEFAULT_ROLE_NAME, Role, RoleAudit, RoleId, RoleMembership};
pub use user::{SuperuserMark, UserId};
