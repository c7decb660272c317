//! Domain services (business logic)

pub mod catalog_service;
pub mod link_resolver;
pub mod location_guard;
pub mod menu_item_service;
pub mod menu_service;
pub mod slug_allocator;

pub use catalog_service::CatalogService;
pub use link_resolver::{LinkResolver, LinkStrategy, SYSTEM_ROUTES};
pub use location_guard::LocationGuard;
pub use menu_item_service::MenuItemService;
pub use menu_service::MenuService;
pub use slug_allocator::SlugAllocator;
