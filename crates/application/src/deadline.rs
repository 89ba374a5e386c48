use std::future::Future;
use std::time::Duration;

use warden_core::{AppError, AppResult};

/// Lookup deadline applied when a service is built without an explicit one.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(2);

/// Runs one store lookup under `limit`.
///
/// An expired deadline is a store failure, never a denial.
pub(crate) async fn with_deadline<T, F>(limit: Duration, lookup: &str, future: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(limit, future).await {
        Ok(result) => result,
        Err(_) => Err(AppError::Unavailable(format!(
            "{lookup} lookup timed out after {} ms",
            limit.as_millis()
        ))),
    }
}
