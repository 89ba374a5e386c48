use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use subtle::ConstantTimeEq;
use warden_core::AppError;

use crate::error::ApiResult;
use crate::state::AppState;

/// Header carrying the shared secret of a calling service.
pub const SERVICE_TOKEN_HEADER: &str = "x-warden-service-token";

/// Rejects `/api` calls that do not present the configured service token.
pub async fn require_service_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if !service_token_matches(request.headers(), state.service_token.as_str()) {
        return Err(AppError::Unauthorized("service token required".to_owned()).into());
    }

    Ok(next.run(request).await)
}

fn service_token_matches(headers: &HeaderMap, expected: &str) -> bool {
    let Some(presented) = headers.get(SERVICE_TOKEN_HEADER) else {
        return false;
    };

    presented.as_bytes().ct_eq(expected.as_bytes()).into()
}
