//! Warden API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;
use warden_application::{AuthorizationService, MembershipService};
use warden_core::AppError;
use warden_infrastructure::PostgresAuthorizationRepository;

use crate::api_config::{ApiConfig, init_tracing};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    if config.migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let repository = Arc::new(PostgresAuthorizationRepository::new(pool.clone()));
    let authorization_service = AuthorizationService::new(
        repository.clone(),
        repository.clone(),
        repository.clone(),
        repository.clone(),
    )
    .with_lookup_timeout(config.lookup_timeout);
    let membership_service = MembershipService::new(authorization_service.clone(), repository);

    let app_state = AppState {
        authorization_service,
        membership_service,
        postgres_pool: Some(pool),
        service_token: config.service_token.clone(),
    };

    let app = api_router::build_router(app_state);
    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind API listener: {error}")))?;

    info!(
        %address,
        lookup_timeout_ms = config.lookup_timeout.as_millis(),
        "warden api listening"
    );

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server failed: {error}")))
}
