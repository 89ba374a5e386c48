use async_trait::async_trait;
use warden_application::SuperuserRegistry;
use warden_core::AppResult;
use warden_domain::UserId;

use super::{PostgresAuthorizationRepository, store_error};

#[async_trait]
impl SuperuserRegistry for PostgresAuthorizationRepository {
    async fn is_superuser(&self, user_id: UserId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM superusers
                WHERE user_id = $1
            )
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| store_error("load superuser mark", error))
    }
}
