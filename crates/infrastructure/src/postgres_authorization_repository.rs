//! PostgreSQL adapters for the authorization ports.

mod definitions;
mod grants;
mod memberships;
mod superusers;


use sqlx::PgPool;
use tracing::warn;
use warden_core::AppError;

/// PostgreSQL-backed repository for definition, grant, membership and
/// superuser lookups.
#[derive(Clone)]
pub struct PostgresAuthorizationRepository {
    pool: PgPool,
}

impl PostgresAuthorizationRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn store_error(context: &str, error: sqlx::Error) -> AppError {
    warn!(context, error = %error, "authorization store query failed");
    AppError::Unavailable(format!("failed to {context}: {error}"))
}
