//! Content lookup used to resolve typed links (port)

use async_trait::async_trait;

use nav_shared::RecordId;

use crate::domain::{CatalogEntry, ContentKind};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkLookup: Send + Sync {
    async fn exists(&self, kind: ContentKind, id: RecordId) -> Result<bool, DomainError>;
    async fn is_published(&self, kind: ContentKind, id: RecordId) -> Result<bool, DomainError>;
    async fn canonical_url(&self, kind: ContentKind, id_or_slug: &str) -> Result<String, DomainError>;
}

/// Source of the "quick add" panel listings
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentCatalog: Send + Sync {
    async fn publishable(&self, kind: ContentKind, limit: u32) -> Result<Vec<CatalogEntry>, DomainError>;
}
