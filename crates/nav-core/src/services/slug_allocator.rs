//! Unique menu slug allocation

use std::sync::Arc;

use tracing::{debug, warn};

use nav_shared::RecordId;

use crate::error::DomainError;
use crate::navigation::slug;
use crate::repositories::MenuRepository;

/// Probes the menu store for a free slug: `base`, `base-2`, `base-3`, …
pub struct SlugAllocator<R: MenuRepository + ?Sized> {
    menu_repo: Arc<R>,
    max_attempts: u32,
}

impl<R: MenuRepository + ?Sized> SlugAllocator<R> {
    pub fn new(menu_repo: Arc<R>, max_attempts: u32) -> Self {
        Self {
            menu_repo,
            max_attempts: max_attempts.max(1),
        }
    }

    /// `exclude_id` lets a menu keep its own slug on update.
    pub async fn allocate_unique(&self, base: &str, exclude_id: Option<RecordId>) -> Result<String, DomainError> {
        let base = slug::sanitize(base);

        for attempt in 1..=self.max_attempts {
            let candidate = slug::candidate(&base, attempt);
            if !self.menu_repo.slug_exists(&candidate, exclude_id).await? {
                debug!("Allocated slug {} after {} attempt(s)", candidate, attempt);
                return Ok(candidate);
            }
        }

        warn!("No free slug for base {} within {} attempts", base, self.max_attempts);
        Err(DomainError::UnableToGenerateUniqueSlug(base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockMenuRepository;
    use std::collections::HashSet;

    fn repo_with(taken: &[&str]) -> MockMenuRepository {
        let taken: HashSet<String> = taken.iter().map(|s| s.to_string()).collect();
        let mut repo = MockMenuRepository::new();
        repo.expect_slug_exists()
            .returning(move |slug, _| Ok(taken.contains(slug)));
        repo
    }

    #[tokio::test]
    async fn test_free_base_is_used_as_is() {
        let allocator = SlugAllocator::new(Arc::new(repo_with(&[])), 10);
        assert_eq!(allocator.allocate_unique("Main", None).await.unwrap(), "main");
    }

    #[tokio::test]
    async fn test_collisions_append_counter() {
        let allocator = SlugAllocator::new(Arc::new(repo_with(&["main"])), 10);
        assert_eq!(allocator.allocate_unique("main", None).await.unwrap(), "main-2");

        let allocator = SlugAllocator::new(Arc::new(repo_with(&["main", "main-2"])), 10);
        assert_eq!(allocator.allocate_unique("main", None).await.unwrap(), "main-3");
    }

    #[tokio::test]
    async fn test_attempt_cap() {
        let allocator = SlugAllocator::new(Arc::new(repo_with(&["main", "main-2", "main-3"])), 3);
        let err = allocator.allocate_unique("main", None).await.unwrap_err();
        assert!(matches!(err, DomainError::UnableToGenerateUniqueSlug(ref b) if b == "main"));
    }

    #[tokio::test]
    async fn test_exclude_id_is_forwarded() {
        let mut repo = MockMenuRepository::new();
        repo.expect_slug_exists()
            .withf(|slug, exclude| slug == "footer" && *exclude == Some(4))
            .times(1)
            .returning(|_, _| Ok(false));
        let allocator = SlugAllocator::new(Arc::new(repo), 5);
        assert_eq!(allocator.allocate_unique("Footer", Some(4)).await.unwrap(), "footer");
    }
}
