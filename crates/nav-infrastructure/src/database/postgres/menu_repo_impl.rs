// ============================================================================
// Nav Infrastructure - PostgreSQL Menu Repository
// File: crates/nav-infrastructure/src/database/postgres/menu_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use nav_core::domain::Menu;
use nav_core::error::DomainError;
use nav_core::repositories::MenuRepository;
use nav_shared::RecordId;

use super::{db_error, failure_of, DbFailure};

pub struct PgMenuRepository {
    pool: PgPool,
}

impl PgMenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MenuRepository for PgMenuRepository {
    async fn ready(&self) -> Result<bool, DomainError> {
        let ready: bool = sqlx::query_scalar(
            r#"
            SELECT to_regclass('menus') IS NOT NULL
               AND to_regclass('menu_items') IS NOT NULL
            "#
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("probing navigation tables", e))?;

        Ok(ready)
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Menu>, DomainError> {
        let row: Option<MenuRow> = sqlx::query_as(
            r#"
            SELECT
                id, slug, name, location, description,
                created_at, created_by, modified_at, modified_by
            FROM menus
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding menu by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_location(&self, location: &str, exclude_id: Option<RecordId>) -> Result<Option<Menu>, DomainError> {
        let row: Option<MenuRow> = sqlx::query_as(
            r#"
            SELECT
                id, slug, name, location, description,
                created_at, created_by, modified_at, modified_by
            FROM menus
            WHERE location = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            ORDER BY id
            LIMIT 1
            "#
        )
        .bind(location)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding menu by location", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<RecordId>) -> Result<bool, DomainError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM menus
                WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )
            "#
        )
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("checking menu slug", e))?;

        Ok(exists)
    }

    async fn list_all(&self) -> Result<Vec<Menu>, DomainError> {
        let rows: Vec<MenuRow> = sqlx::query_as(
            r#"
            SELECT
                id, slug, name, location, description,
                created_at, created_by, modified_at, modified_by
            FROM menus
            ORDER BY name, id
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing menus", e))?;

        Ok(rows.into_iter().map(Menu::from).collect())
    }

    async fn create(&self, menu: &Menu) -> Result<Menu, DomainError> {
        info!("Inserting menu: {}", menu.slug);

        let row: MenuRow = sqlx::query_as(
            r#"
            INSERT INTO menus (
                slug, name, location, description, created_at, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING
                id, slug, name, location, description,
                created_at, created_by, modified_at, modified_by
            "#
        )
        .bind(&menu.slug)
        .bind(&menu.name)
        .bind(&menu.location)
        .bind(&menu.description)
        .bind(menu.created_at)
        .bind(menu.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error("creating menu", e, menu))?;

        Ok(row.into())
    }

    async fn update(&self, menu: &Menu) -> Result<Menu, DomainError> {
        let row: Option<MenuRow> = sqlx::query_as(
            r#"
            UPDATE menus
            SET slug = $2, name = $3, location = $4, description = $5,
                modified_at = $6, modified_by = $7
            WHERE id = $1
            RETURNING
                id, slug, name, location, description,
                created_at, created_by, modified_at, modified_by
            "#
        )
        .bind(menu.id)
        .bind(&menu.slug)
        .bind(&menu.name)
        .bind(&menu.location)
        .bind(&menu.description)
        .bind(menu.modified_at)
        .bind(menu.modified_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error("updating menu", e, menu))?;

        row.map(Menu::from).ok_or(DomainError::MenuNotFound(menu.id))
    }

    async fn delete(&self, id: RecordId) -> Result<bool, DomainError> {
        // menu_items rows go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM menus WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting menu", e))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Maps a unique-index rejection to the conflict the service can recover from.
fn write_error(context: &str, e: sqlx::Error, menu: &Menu) -> DomainError {
    match failure_of(&e) {
        DbFailure::LocationTaken => DomainError::LocationInUse(menu.location.clone().unwrap_or_default()),
        DbFailure::SlugTaken => DomainError::SlugTaken(menu.slug.clone()),
        DbFailure::MissingTable | DbFailure::Other => db_error(context, e),
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MenuRow {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<Uuid>,
}

impl From<MenuRow> for Menu {
    fn from(row: MenuRow) -> Self {
        Menu {
            id: row.id,
            slug: row.slug,
            name: row.name,
            location: row.location,
            description: row.description,
            created_at: row.created_at,
            created_by: row.created_by,
            modified_at: row.modified_at,
            modified_by: row.modified_by,
        }
    }
}
