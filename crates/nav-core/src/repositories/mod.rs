//! Repository traits (ports)

pub mod menu_repository;
pub mod menu_item_repository;
pub mod link_lookup;

pub use menu_repository::MenuRepository;
pub use menu_item_repository::MenuItemRepository;
pub use link_lookup::{ContentCatalog, LinkLookup};

#[cfg(test)]
pub use menu_repository::MockMenuRepository;
#[cfg(test)]
pub use menu_item_repository::MockMenuItemRepository;
#[cfg(test)]
pub use link_lookup::{MockContentCatalog, MockLinkLookup};
