//! # Nav Infrastructure
//! 
//! Database and in-process implementations of the navigation ports (adapters).

pub mod content;
pub mod database;
pub mod memory;

pub use database::{
    create_pool, run_migrations, PgContentRepository, PgMenuItemRepository, PgMenuRepository,
};
pub use memory::{MemoryContent, MemoryMenuItemRepository, MemoryMenuRepository, MemoryStore};
