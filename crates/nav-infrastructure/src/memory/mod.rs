//! In-process adapters for local runs and tests

pub mod content;
pub mod store;

pub use content::MemoryContent;
pub use store::{MemoryMenuItemRepository, MemoryMenuRepository, MemoryStore};
