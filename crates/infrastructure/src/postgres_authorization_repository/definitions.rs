use async_trait::async_trait;
use sqlx::FromRow;
use warden_application::DefinitionRegistry;
use warden_core::AppResult;
use warden_domain::{
    AccessLevelDefinition, AccessLevelId, AccessRank, FunctionalityDefinition, FunctionalityId,
    ObjectDefinition, ObjectId,
};

use super::{PostgresAuthorizationRepository, store_error};

#[derive(Debug, FromRow)]
struct NamedDefinitionRow {
    id: i64,
    name: String,
    description: String,
}

#[derive(Debug, FromRow)]
struct AccessLevelRow {
    id: i64,
    name: String,
    access_level: i32,
}

#[async_trait]
impl DefinitionRegistry for PostgresAuthorizationRepository {
    async fn find_functionality(&self, name: &str) -> AppResult<Option<FunctionalityDefinition>> {
        let row = sqlx::query_as::<_, NamedDefinitionRow>(
            r#"
            SELECT id, name, description
            FROM adm_functionality_definitions
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| store_error("load functionality definition", error))?;

        row.map(|row| {
            FunctionalityDefinition::new(FunctionalityId::new(row.id), row.name, row.description)
        })
        .transpose()
    }

    async fn find_object(&self, name: &str) -> AppResult<Option<ObjectDefinition>> {
        let row = sqlx::query_as::<_, NamedDefinitionRow>(
            r#"
            SELECT id, name, description
            FROM adm_object_definitions
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| store_error("load object definition", error))?;

        row.map(|row| ObjectDefinition::new(ObjectId::new(row.id), row.name, row.description))
            .transpose()
    }

    async fn find_access_level(&self, name: &str) -> AppResult<Option<AccessLevelDefinition>> {
        let row = sqlx::query_as::<_, AccessLevelRow>(
            r#"
            SELECT id, name, access_level
            FROM adm_access_level_definitions
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| store_error("load access level definition", error))?;

        row.map(|row| {
            AccessLevelDefinition::new(
                AccessLevelId::new(row.id),
                row.name,
                AccessRank::new(row.access_level),
            )
        })
        .transpose()
    }
}
