// ============================================================================
// Nav Core - Menu Service
// File: crates/nav-core/src/services/menu_service.rs
// ============================================================================
//! Menu CRUD with slug allocation and location exclusivity

use std::sync::Arc;

use tracing::{error, info, warn};

use nav_shared::config::NavigationSettings;
use nav_shared::utils::{non_blank, normalize_location};
use nav_shared::RecordId;

use crate::domain::{AdminContext, Menu, MenuInput};
use crate::error::DomainError;
use crate::navigation::slug;
use crate::repositories::MenuRepository;
use crate::services::location_guard::LocationGuard;
use crate::services::slug_allocator::SlugAllocator;

/// Menu store: validates, guards the location slot, allocates slugs, and
/// retries when a concurrent writer wins the unique index race.
pub struct MenuService<R: MenuRepository + ?Sized> {
    menu_repo: Arc<R>,
    slugs: SlugAllocator<R>,
    locations: LocationGuard<R>,
    max_write_retries: u32,
}

impl<R: MenuRepository + ?Sized> MenuService<R> {
    pub fn new(menu_repo: Arc<R>, settings: &NavigationSettings) -> Self {
        Self {
            slugs: SlugAllocator::new(menu_repo.clone(), settings.max_slug_attempts),
            locations: LocationGuard::new(menu_repo.clone()),
            menu_repo,
            max_write_retries: settings.max_write_retries.max(1),
        }
    }

    /// Whether the navigation tables exist. Callers degrade instead of failing.
    pub async fn ready(&self) -> bool {
        match self.menu_repo.ready().await {
            Ok(ready) => ready,
            Err(e) => {
                error!("Readiness probe failed: {}", e);
                false
            }
        }
    }

    pub async fn find(&self, id: RecordId) -> Result<Menu, DomainError> {
        self.menu_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::MenuNotFound(id))
    }

    pub async fn find_by_location(&self, location: &str) -> Result<Option<Menu>, DomainError> {
        match normalize_location(Some(location)) {
            Some(location) => self.locations.find_conflict(&location, None).await,
            None => Ok(None),
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Menu>, DomainError> {
        self.menu_repo.list_all().await
    }

    pub async fn create(&self, ctx: &AdminContext, input: MenuInput) -> Result<Menu, DomainError> {
        let name = required_name(&input)?;
        let location = normalize_location(input.location.as_deref());
        let description = non_blank(input.description.as_deref());
        let slug_base = non_blank(input.slug.as_deref()).unwrap_or_else(|| name.clone());

        info!("Creating menu {} (location {:?})", name, location);

        let mut last_conflict = None;
        for attempt in 1..=self.max_write_retries {
            self.locations.ensure_free(location.as_deref(), None).await?;
            let slug = self.slugs.allocate_unique(&slug_base, None).await?;
            let menu = Menu::new(name.clone(), slug, location.clone(), description.clone(), ctx.actor_id)?;

            match self.menu_repo.create(&menu).await {
                Ok(created) => {
                    info!("Menu created: {} ({})", created.id, created.slug);
                    return Ok(created);
                }
                Err(e) => {
                    last_conflict = Some(self.recover_conflict(e, location.as_deref(), None, attempt).await?)
                }
            }
        }

        Err(exhausted(last_conflict, &slug_base))
    }

    pub async fn update(&self, ctx: &AdminContext, id: RecordId, input: MenuInput) -> Result<Menu, DomainError> {
        let mut menu = self.find(id).await?;
        let name = required_name(&input)?;
        let location = normalize_location(input.location.as_deref());
        let description = non_blank(input.description.as_deref());
        let slug_base = non_blank(input.slug.as_deref()).unwrap_or_else(|| name.clone());

        info!("Updating menu {} by {}", id, ctx.actor_id);

        let mut last_conflict = None;
        for attempt in 1..=self.max_write_retries {
            self.locations.ensure_free(location.as_deref(), Some(id)).await?;
            let slug = self.slugs.allocate_unique(&slug_base, Some(id)).await?;
            menu.apply(name.clone(), slug, location.clone(), description.clone(), ctx.actor_id)?;

            match self.menu_repo.update(&menu).await {
                Ok(updated) => return Ok(updated),
                Err(e) => {
                    last_conflict = Some(self.recover_conflict(e, location.as_deref(), Some(id), attempt).await?)
                }
            }
        }

        Err(exhausted(last_conflict, &slug_base))
    }

    /// Deletes the menu and, through the store, all of its items.
    pub async fn delete(&self, ctx: &AdminContext, id: RecordId) -> Result<(), DomainError> {
        if !self.menu_repo.delete(id).await? {
            return Err(DomainError::MenuNotFound(id));
        }
        info!("Menu {} deleted by {}", id, ctx.actor_id);
        Ok(())
    }

    /// A unique-index rejection means another writer got there between our
    /// check and our write. Slug races are retried; a location race is
    /// reported with the winner's name. A retryable conflict is handed back
    /// so the caller can report it once the retries run out.
    async fn recover_conflict(
        &self,
        error: DomainError,
        location: Option<&str>,
        exclude_id: Option<RecordId>,
        attempt: u32,
    ) -> Result<DomainError, DomainError> {
        match error {
            DomainError::SlugTaken(slug) => {
                warn!("Slug {} taken concurrently (attempt {}), retrying", slug, attempt);
                Ok(DomainError::SlugTaken(slug))
            }
            DomainError::LocationInUse(taken) => {
                self.locations.ensure_free(location, exclude_id).await?;
                // The holder disappeared again; another round will tell.
                warn!("Location {} contended (attempt {}), retrying", taken, attempt);
                Ok(DomainError::LocationInUse(taken))
            }
            other => {
                if other.is_persistence() {
                    error!("Menu write failed: {}", other);
                }
                Err(other)
            }
        }
    }
}

/// Error for a write that lost every race: the last conflict seen.
fn exhausted(last_conflict: Option<DomainError>, slug_base: &str) -> DomainError {
    last_conflict.unwrap_or_else(|| DomainError::UnableToGenerateUniqueSlug(slug::sanitize(slug_base)))
}

fn required_name(input: &MenuInput) -> Result<String, DomainError> {
    non_blank(Some(&input.name)).ok_or_else(|| DomainError::field("name", "Menu name is required"))
}
