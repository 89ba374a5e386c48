//! Application services and ports.

#![forbid(unsafe_code)]

mod authorization_ports;
mod authorization_service;
mod deadline;
mod membership_service;
mod permission_resolver;

#[cfg(test)]
mod test_support;

pub use authorization_ports::{
    DefinitionRegistry, GrantRepository, RoleMembershipRepository, SuperuserRegistry,
};
pub use authorization_service::{AuthorizationService, PermissionSummary};
pub use deadline::DEFAULT_LOOKUP_TIMEOUT;
pub use membership_service::{ADMIN_FUNCTIONALITY, MembershipService, ROLE_MEMBERSHIP_OBJECT};
pub use permission_resolver::PermissionResolver;
