// ============================================================================
// Nav Infrastructure - PostgreSQL Content Lookup
// File: crates/nav-infrastructure/src/database/postgres/content_repo_impl.rs
// Description: Read-only access to pages, posts and categories for link
//              resolution and the quick-add panel
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use nav_core::domain::{CatalogEntry, ContentKind};
use nav_core::error::DomainError;
use nav_core::repositories::{ContentCatalog, LinkLookup};
use nav_shared::RecordId;

use super::db_error;
use crate::content::canonical_url;

pub struct PgContentRepository {
    pool: PgPool,
    base_url: String,
}

impl PgContentRepository {
    pub fn new(pool: PgPool, base_url: impl Into<String>) -> Self {
        Self {
            pool,
            base_url: base_url.into(),
        }
    }
}

fn table(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Page => "pages",
        ContentKind::Post => "posts",
        ContentKind::Category => "categories",
    }
}

/// Categories have no publication workflow.
fn published_filter(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Page | ContentKind::Post => "status = 'published'",
        ContentKind::Category => "TRUE",
    }
}

#[async_trait]
impl LinkLookup for PgContentRepository {
    async fn exists(&self, kind: ContentKind, id: RecordId) -> Result<bool, DomainError> {
        let sql = format!("SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1)", table(kind));
        sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("checking content existence", e))
    }

    async fn is_published(&self, kind: ContentKind, id: RecordId) -> Result<bool, DomainError> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1 AND {})",
            table(kind),
            published_filter(kind)
        );
        sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("checking content status", e))
    }

    async fn canonical_url(&self, kind: ContentKind, id_or_slug: &str) -> Result<String, DomainError> {
        let Ok(id) = id_or_slug.parse::<RecordId>() else {
            return Ok(canonical_url(&self.base_url, kind, id_or_slug));
        };

        let sql = format!("SELECT slug FROM {} WHERE id = $1", table(kind));
        let slug: Option<String> = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("reading content slug", e))?;

        let slug = slug.unwrap_or_else(|| id_or_slug.to_string());
        Ok(canonical_url(&self.base_url, kind, &slug))
    }
}

#[async_trait]
impl ContentCatalog for PgContentRepository {
    async fn publishable(&self, kind: ContentKind, limit: u32) -> Result<Vec<CatalogEntry>, DomainError> {
        let sql = format!(
            "SELECT id, slug, title FROM {} WHERE {} ORDER BY title, id LIMIT $1",
            table(kind),
            published_filter(kind)
        );
        let rows: Vec<ContentRow> = sqlx::query_as(&sql)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("listing quick-add content", e))?;

        Ok(rows
            .into_iter()
            .map(|row| CatalogEntry {
                kind,
                id: row.id,
                url: canonical_url(&self.base_url, kind, &row.slug),
                title: row.title,
            })
            .collect())
    }
}

#[derive(Debug, FromRow)]
struct ContentRow {
    pub id: i64,
    pub slug: String,
    pub title: String,
}
