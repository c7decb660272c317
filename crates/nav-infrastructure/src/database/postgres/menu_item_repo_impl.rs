// ============================================================================
// Nav Infrastructure - PostgreSQL Menu Item Repository
// File: crates/nav-infrastructure/src/database/postgres/menu_item_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{info, warn};
use uuid::Uuid;

use nav_core::domain::{ItemPosition, ItemTarget, LinkType, MenuItem};
use nav_core::error::DomainError;
use nav_core::repositories::MenuItemRepository;
use nav_shared::RecordId;

use super::db_error;

pub struct PgMenuItemRepository {
    pool: PgPool,
}

impl PgMenuItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MenuItemRepository for PgMenuItemRepository {
    async fn list_for_menu(&self, menu_id: RecordId) -> Result<Vec<MenuItem>, DomainError> {
        let rows: Vec<MenuItemRow> = sqlx::query_as(
            r#"
            SELECT
                id, menu_id, parent_id, title, link_type, link_reference,
                url, target, css_class, sort_order,
                created_at, created_by, modified_at, modified_by
            FROM menu_items
            WHERE menu_id = $1
            ORDER BY sort_order, id
            "#
        )
        .bind(menu_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing menu items", e))?;

        Ok(rows.into_iter().map(MenuItem::from).collect())
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<MenuItem>, DomainError> {
        let row: Option<MenuItemRow> = sqlx::query_as(
            r#"
            SELECT
                id, menu_id, parent_id, title, link_type, link_reference,
                url, target, css_class, sort_order,
                created_at, created_by, modified_at, modified_by
            FROM menu_items
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding menu item by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, item: &MenuItem) -> Result<MenuItem, DomainError> {
        let row: MenuItemRow = sqlx::query_as(
            r#"
            INSERT INTO menu_items (
                menu_id, parent_id, title, link_type, link_reference,
                url, target, css_class, sort_order, created_at, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING
                id, menu_id, parent_id, title, link_type, link_reference,
                url, target, css_class, sort_order,
                created_at, created_by, modified_at, modified_by
            "#
        )
        .bind(item.menu_id)
        .bind(item.parent_id)
        .bind(&item.title)
        .bind(item.link_type.as_str())
        .bind(&item.link_reference)
        .bind(&item.url)
        .bind(item.target.as_str())
        .bind(&item.css_class)
        .bind(item.sort_order)
        .bind(item.created_at)
        .bind(item.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("creating menu item", e))?;

        info!("Menu item created: {} in menu {}", row.id, row.menu_id);
        Ok(row.into())
    }

    async fn update(&self, item: &MenuItem) -> Result<MenuItem, DomainError> {
        let row: Option<MenuItemRow> = sqlx::query_as(
            r#"
            UPDATE menu_items
            SET parent_id = $2, title = $3, link_type = $4, link_reference = $5,
                url = $6, target = $7, css_class = $8, sort_order = $9,
                modified_at = $10, modified_by = $11
            WHERE id = $1
            RETURNING
                id, menu_id, parent_id, title, link_type, link_reference,
                url, target, css_class, sort_order,
                created_at, created_by, modified_at, modified_by
            "#
        )
        .bind(item.id)
        .bind(item.parent_id)
        .bind(&item.title)
        .bind(item.link_type.as_str())
        .bind(&item.link_reference)
        .bind(&item.url)
        .bind(item.target.as_str())
        .bind(&item.css_class)
        .bind(item.sort_order)
        .bind(item.modified_at)
        .bind(item.modified_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("updating menu item", e))?;

        row.map(MenuItem::from).ok_or(DomainError::MenuItemNotFound(item.id))
    }

    async fn delete_promoting_children(&self, id: RecordId) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting item delete", e))?;

        let promoted = sqlx::query(
            "UPDATE menu_items SET parent_id = NULL, modified_at = NOW() WHERE parent_id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("promoting child items", e))?;

        let deleted = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("deleting menu item", e))?;

        if deleted.rows_affected() == 0 {
            // Nothing to delete; dropping the transaction rolls back.
            return Ok(false);
        }

        tx.commit()
            .await
            .map_err(|e| db_error("committing item delete", e))?;

        info!("Menu item {} deleted, {} children promoted", id, promoted.rows_affected());
        Ok(true)
    }

    async fn apply_positions(&self, menu_id: RecordId, positions: &[ItemPosition]) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting reorder", e))?;

        for position in positions {
            let result = sqlx::query(
                r#"
                UPDATE menu_items
                SET parent_id = $3, sort_order = $4, modified_at = NOW()
                WHERE id = $1 AND menu_id = $2
                "#
            )
            .bind(position.id)
            .bind(menu_id)
            .bind(position.parent_id)
            .bind(position.sort_order)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("applying item position", e))?;

            if result.rows_affected() == 0 {
                warn!("Reorder of menu {} names unknown item {}", menu_id, position.id);
                return Err(DomainError::MenuItemNotFound(position.id));
            }
        }

        tx.commit()
            .await
            .map_err(|e| db_error("committing reorder", e))?;

        Ok(())
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MenuItemRow {
    pub id: i64,
    pub menu_id: i64,
    pub parent_id: Option<i64>,
    pub title: String,
    pub link_type: String,
    pub link_reference: String,
    pub url: String,
    pub target: String,
    pub css_class: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<Uuid>,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        MenuItem {
            id: row.id,
            menu_id: row.menu_id,
            parent_id: row.parent_id,
            title: row.title,
            link_type: LinkType::from_str(&row.link_type).unwrap_or_default(),
            link_reference: row.link_reference,
            url: row.url,
            target: ItemTarget::from_str(&row.target).unwrap_or_default(),
            css_class: row.css_class,
            sort_order: row.sort_order,
            created_at: row.created_at,
            created_by: row.created_by,
            modified_at: row.modified_at,
            modified_by: row.modified_by,
        }
    }
}
