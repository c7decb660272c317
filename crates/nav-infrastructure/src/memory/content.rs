//! Pages, posts and categories held in process

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use nav_core::domain::{CatalogEntry, ContentKind};
use nav_core::error::DomainError;
use nav_core::repositories::{ContentCatalog, LinkLookup};
use nav_shared::RecordId;

use crate::content::canonical_url;

#[derive(Debug, Clone)]
struct ContentRecord {
    slug: String,
    title: String,
    published: bool,
}

#[derive(Default)]
struct ContentState {
    records: HashMap<(ContentKind, RecordId), ContentRecord>,
    failing: bool,
}

#[derive(Clone, Default)]
pub struct MemoryContent {
    base_url: String,
    state: Arc<RwLock<ContentState>>,
}

impl MemoryContent {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            state: Arc::default(),
        }
    }

    pub fn insert(&self, kind: ContentKind, id: RecordId, slug: &str, title: &str, published: bool) {
        self.state.write().records.insert(
            (kind, id),
            ContentRecord {
                slug: slug.to_string(),
                title: title.to_string(),
                published,
            },
        );
    }

    pub fn remove(&self, kind: ContentKind, id: RecordId) {
        self.state.write().records.remove(&(kind, id));
    }

    pub fn set_published(&self, kind: ContentKind, id: RecordId, published: bool) {
        if let Some(record) = self.state.write().records.get_mut(&(kind, id)) {
            record.published = published;
        }
    }

    /// Makes every lookup fail, as an unreachable content store would.
    pub fn set_failing(&self, failing: bool) {
        self.state.write().failing = failing;
    }

    fn read(&self) -> Result<parking_lot::RwLockReadGuard<'_, ContentState>, DomainError> {
        let state = self.state.read();
        if state.failing {
            return Err(DomainError::DatabaseError("content store unavailable".into()));
        }
        Ok(state)
    }
}

#[async_trait]
impl LinkLookup for MemoryContent {
    async fn exists(&self, kind: ContentKind, id: RecordId) -> Result<bool, DomainError> {
        Ok(self.read()?.records.contains_key(&(kind, id)))
    }

    async fn is_published(&self, kind: ContentKind, id: RecordId) -> Result<bool, DomainError> {
        let state = self.read()?;
        Ok(match kind {
            ContentKind::Category => state.records.contains_key(&(kind, id)),
            _ => state.records.get(&(kind, id)).is_some_and(|r| r.published),
        })
    }

    async fn canonical_url(&self, kind: ContentKind, id_or_slug: &str) -> Result<String, DomainError> {
        let state = self.read()?;
        let slug = id_or_slug
            .parse::<RecordId>()
            .ok()
            .and_then(|id| state.records.get(&(kind, id)))
            .map(|r| r.slug.as_str())
            .unwrap_or(id_or_slug);
        Ok(canonical_url(&self.base_url, kind, slug))
    }
}

#[async_trait]
impl ContentCatalog for MemoryContent {
    async fn publishable(&self, kind: ContentKind, limit: u32) -> Result<Vec<CatalogEntry>, DomainError> {
        let state = self.read()?;
        let mut entries: Vec<CatalogEntry> = state
            .records
            .iter()
            .filter(|((k, _), r)| *k == kind && (kind == ContentKind::Category || r.published))
            .map(|((_, id), r)| CatalogEntry {
                kind,
                id: *id,
                title: r.title.clone(),
                url: canonical_url(&self.base_url, kind, &r.slug),
            })
            .collect();
        entries.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        entries.truncate(limit as usize);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_catalog_lists_published_only() {
        let content = MemoryContent::new("");
        content.insert(ContentKind::Page, 1, "about", "About", true);
        content.insert(ContentKind::Page, 2, "draft", "Draft", false);
        content.insert(ContentKind::Page, 3, "contact", "Contact", true);
        content.insert(ContentKind::Category, 4, "news", "News", false);

        let pages = content.publishable(ContentKind::Page, 10).await.unwrap();
        let titles: Vec<&str> = pages.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["About", "Contact"]);
        assert_eq!(pages[1].url, "/contact");

        assert_eq!(content.publishable(ContentKind::Page, 1).await.unwrap().len(), 1);
        assert_eq!(content.publishable(ContentKind::Category, 10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failing_lookup() {
        let content = MemoryContent::new("");
        content.set_failing(true);
        assert!(content.exists(ContentKind::Post, 1).await.is_err());
    }
}
