//! Menu repository trait (port)

use async_trait::async_trait;

use nav_shared::RecordId;

use crate::domain::Menu;
use crate::error::DomainError;

/// Persistence for menus. Implementations must back `slug` and `location`
/// with unique constraints and report violations as
/// [`DomainError::SlugTaken`] / [`DomainError::LocationInUse`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Whether the backing tables exist.
    async fn ready(&self) -> Result<bool, DomainError>;
    async fn find_by_id(&self, id: RecordId) -> Result<Option<Menu>, DomainError>;
    async fn find_by_location(&self, location: &str, exclude_id: Option<RecordId>) -> Result<Option<Menu>, DomainError>;
    async fn slug_exists(&self, slug: &str, exclude_id: Option<RecordId>) -> Result<bool, DomainError>;
    async fn list_all(&self) -> Result<Vec<Menu>, DomainError>;
    async fn create(&self, menu: &Menu) -> Result<Menu, DomainError>;
    async fn update(&self, menu: &Menu) -> Result<Menu, DomainError>;
    /// Removes the menu and all of its items. Returns `false` when absent.
    async fn delete(&self, id: RecordId) -> Result<bool, DomainError>;
}
