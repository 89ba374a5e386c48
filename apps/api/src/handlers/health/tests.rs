use axum::extract::State;
use axum::http::StatusCode;

use crate::handlers::test_support::in_memory_state;

use super::health_handler;

#[tokio::test]
async fn health_is_ok_without_postgres() {
    let state = in_memory_state().await;

    let (status, payload) = health_handler(State(state)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(payload.ready);
    assert_eq!(payload.postgres.status, "disabled");
}
