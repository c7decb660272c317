//! # Nav Core - Domain Module
//! 
//! Domain entities for navigation menu administration.

pub mod catalog;
pub mod context;
pub mod link;
pub mod menu;
pub mod menu_item;
pub mod view;

// Re-export all entities and enums
pub use catalog::CatalogEntry;
pub use context::AdminContext;
pub use link::{ContentKind, LinkIssue, LinkRequest, LinkState, LinkType, ResolvedLink};
pub use menu::{Menu, MenuInput};
pub use menu_item::{ItemPosition, ItemTarget, MenuItem, MenuItemInput};
pub use view::{FlatItem, MenuView, RenderedItem};
