mod checks;
mod handlers;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::{HealthDependencyStatus, HealthResponse};
use crate::state::AppState;

pub use handlers::health_handler;

#[cfg(test)]
mod tests;
