use sqlx::PgPool;
use warden_application::{AuthorizationService, MembershipService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authorization_service: AuthorizationService,
    pub membership_service: MembershipService,
    pub postgres_pool: Option<PgPool>,
    pub service_token: String,
}
