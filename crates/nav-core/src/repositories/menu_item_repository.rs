//! Menu item repository trait (port)

use async_trait::async_trait;

use nav_shared::RecordId;

use crate::domain::{ItemPosition, MenuItem};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuItemRepository: Send + Sync {
    /// Items of one menu ordered by `sort_order`, then `id`.
    async fn list_for_menu(&self, menu_id: RecordId) -> Result<Vec<MenuItem>, DomainError>;
    async fn find_by_id(&self, id: RecordId) -> Result<Option<MenuItem>, DomainError>;
    async fn create(&self, item: &MenuItem) -> Result<MenuItem, DomainError>;
    async fn update(&self, item: &MenuItem) -> Result<MenuItem, DomainError>;
    /// Clears `parent_id` on direct children, then removes the item, atomically.
    async fn delete_promoting_children(&self, id: RecordId) -> Result<bool, DomainError>;
    /// Writes parent and order for many items of one menu atomically.
    async fn apply_positions(&self, menu_id: RecordId, positions: &[ItemPosition]) -> Result<(), DomainError>;
}
