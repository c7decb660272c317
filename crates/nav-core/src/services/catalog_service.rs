//! Quick-add candidates for the menu editor

use std::sync::Arc;

use tracing::debug;

use crate::domain::{CatalogEntry, LinkType};
use crate::error::DomainError;
use crate::repositories::ContentCatalog;

pub struct CatalogService<C: ContentCatalog + ?Sized> {
    catalog: Arc<C>,
    limit: u32,
}

impl<C: ContentCatalog + ?Sized> CatalogService<C> {
    /// `limit` caps every listing (`navigation.quick_add_limit`).
    pub fn new(catalog: Arc<C>, limit: u32) -> Self {
        Self { catalog, limit }
    }

    pub async fn quick_add(&self, link_type: LinkType) -> Result<Vec<CatalogEntry>, DomainError> {
        let kind = link_type.content_kind().ok_or_else(|| {
            DomainError::field("link_type", format!("Quick add does not list {} links", link_type))
        })?;

        let mut entries = self.catalog.publishable(kind, self.limit).await?;
        entries.truncate(self.limit as usize);
        debug!("Quick add offers {} {} entries", entries.len(), kind.as_str());
        Ok(entries)
    }
}
