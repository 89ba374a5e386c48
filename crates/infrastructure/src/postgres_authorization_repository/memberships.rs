use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use warden_application::RoleMembershipRepository;
use warden_core::{AppError, AppResult};
use warden_domain::{Role, RoleAudit, RoleId, RoleMembership, UserId};

use super::{PostgresAuthorizationRepository, store_error};

#[derive(Debug, FromRow)]
struct RoleRow {
    id: i64,
    name: String,
    description: String,
    created_by_id: i64,
    updated_by_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RoleRow {
    fn into_role(self) -> AppResult<Role> {
        Role::new(
            RoleId::new(self.id),
            self.name,
            self.description,
            RoleAudit {
                created_by: UserId::new(self.created_by_id),
                updated_by: UserId::new(self.updated_by_id),
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        )
    }
}

#[async_trait]
impl RoleMembershipRepository for PostgresAuthorizationRepository {
    async fn list_roles_for_user(&self, user_id: UserId) -> AppResult<Vec<RoleId>> {
        let role_ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT role_id
            FROM adm_roles_users
            WHERE user_id = $1
            ORDER BY role_id
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| store_error("load role memberships", error))?;

        Ok(role_ids.into_iter().map(RoleId::new).collect())
    }

    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, name, description, created_by_id, updated_by_id, created_at, updated_at
            FROM adm_roles
            WHERE id = $1
            "#,
        )
        .bind(role_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| store_error("load role", error))?;

        row.map(RoleRow::into_role).transpose()
    }

    async fn find_role_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, name, description, created_by_id, updated_by_id, created_at, updated_at
            FROM adm_roles
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| store_error("load role by name", error))?;

        row.map(RoleRow::into_role).transpose()
    }

    async fn add_membership(&self, membership: RoleMembership) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO adm_roles_users (role_id, user_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(membership.role_id.as_i64())
        .bind(membership.user_id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|error| map_membership_write_error(error, membership))?;

        Ok(())
    }

    async fn remove_membership(&self, membership: RoleMembership) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM adm_roles_users
            WHERE role_id = $1 AND user_id = $2
            "#,
        )
        .bind(membership.role_id.as_i64())
        .bind(membership.user_id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|error| store_error("remove role membership", error))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "user '{}' is not a member of role '{}'",
                membership.user_id, membership.role_id
            )));
        }

        Ok(())
    }
}

fn map_membership_write_error(error: sqlx::Error, membership: RoleMembership) -> AppError {
    if let sqlx::Error::Database(database_error) = &error {
        match database_error.code().as_deref() {
            Some("23505") => {
                return AppError::Conflict(format!(
                    "user '{}' is already a member of role '{}'",
                    membership.user_id, membership.role_id
                ));
            }
            Some("23503") => {
                return AppError::NotFound(format!(
                    "role '{}' or user '{}' does not exist",
                    membership.role_id, membership.user_id
                ));
            }
            _ => {}
        }
    }

    store_error("add role membership", error)
}
