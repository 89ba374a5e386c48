use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

pub fn build_router(app_state: AppState) -> Router {
    let service_routes = Router::new()
        .route(
            "/api/permissions/check",
            post(handlers::permissions::check_permission_handler),
        )
        .route(
            "/api/users/{user_id}/permissions",
            get(handlers::permissions::user_permissions_handler),
        )
        .route(
            "/api/roles/{role_id}/permissions",
            get(handlers::permissions::role_permissions_handler),
        )
        .route(
            "/api/roles/{role_id}/users/{user_id}",
            post(handlers::memberships::assign_role_handler)
                .delete(handlers::memberships::unassign_role_handler),
        )
        .route(
            "/api/users/{user_id}/default-role",
            post(handlers::memberships::assign_default_role_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_service_token,
        ));

    Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(service_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
