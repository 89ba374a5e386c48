use async_trait::async_trait;
use sqlx::FromRow;
use warden_application::GrantRepository;
use warden_core::AppResult;
use warden_domain::{
    AccessLevelId, AccessRank, FunctionalityId, Grant, GrantId, ObjectId, ResolvedGrant, RoleId,
    Subject, UserId,
};

use super::{PostgresAuthorizationRepository, store_error};

#[derive(Debug, FromRow)]
struct GrantRow {
    id: i64,
    user_id: Option<i64>,
    role_id: Option<i64>,
    functionality_id: i64,
    object_id: Option<i64>,
    access_level_id: i64,
    access_level: i32,
}

impl GrantRow {
    fn into_resolved(self) -> AppResult<ResolvedGrant> {
        Ok(ResolvedGrant {
            grant: Grant {
                id: GrantId::new(self.id),
                subject: Subject::from_columns(self.user_id, self.role_id)?,
                functionality_id: FunctionalityId::new(self.functionality_id),
                object_id: self.object_id.map(ObjectId::new),
                access_level_id: AccessLevelId::new(self.access_level_id),
            },
            rank: AccessRank::new(self.access_level),
        })
    }
}

#[async_trait]
impl GrantRepository for PostgresAuthorizationRepository {
    async fn list_grants_for_user(&self, user_id: UserId) -> AppResult<Vec<ResolvedGrant>> {
        let rows = sqlx::query_as::<_, GrantRow>(
            r#"
            SELECT
                permissions.id,
                permissions.user_id,
                permissions.role_id,
                permissions.adm_functionality_definition_id AS functionality_id,
                permissions.adm_object_definition_id AS object_id,
                permissions.adm_access_level_definition_id AS access_level_id,
                levels.access_level
            FROM adm_permissions AS permissions
            INNER JOIN adm_access_level_definitions AS levels
                ON levels.id = permissions.adm_access_level_definition_id
            WHERE permissions.user_id = $1
            ORDER BY permissions.id
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| store_error("load user grants", error))?;

        rows.into_iter().map(GrantRow::into_resolved).collect()
    }

    async fn list_grants_for_roles(&self, role_ids: &[RoleId]) -> AppResult<Vec<ResolvedGrant>> {
        if role_ids.is_empty() {
            return Ok(Vec::new());
        }

        let role_ids = role_ids.iter().map(RoleId::as_i64).collect::<Vec<_>>();
        let rows = sqlx::query_as::<_, GrantRow>(
            r#"
            SELECT
                permissions.id,
                permissions.user_id,
                permissions.role_id,
                permissions.adm_functionality_definition_id AS functionality_id,
                permissions.adm_object_definition_id AS object_id,
                permissions.adm_access_level_definition_id AS access_level_id,
                levels.access_level
            FROM adm_permissions AS permissions
            INNER JOIN adm_access_level_definitions AS levels
                ON levels.id = permissions.adm_access_level_definition_id
            WHERE permissions.role_id = ANY($1)
            ORDER BY permissions.id
            "#,
        )
        .bind(role_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| store_error("load role grants", error))?;

        rows.into_iter().map(GrantRow::into_resolved).collect()
    }
}
