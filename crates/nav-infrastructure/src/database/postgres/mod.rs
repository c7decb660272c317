//! PostgreSQL repository implementations

pub mod menu_repo_impl;
pub mod menu_item_repo_impl;
pub mod content_repo_impl;

pub use menu_repo_impl::PgMenuRepository;
pub use menu_item_repo_impl::PgMenuItemRepository;
pub use content_repo_impl::PgContentRepository;

use tracing::error;

use nav_core::error::DomainError;

/// SQLSTATE for a relation that does not exist.
const UNDEFINED_TABLE: &str = "42P01";
/// SQLSTATE for a unique-index violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Partial unique index on `menus.location`.
const LOCATION_CONSTRAINT: &str = "menus_location_key";

/// How a driver error reads to the navigation domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DbFailure {
    MissingTable,
    LocationTaken,
    SlugTaken,
    Other,
}

/// Maps an SQLSTATE and the violated constraint to a [`DbFailure`]. Any
/// unique violation on `menus` other than the location index is a slug clash.
pub(crate) fn classify(code: Option<&str>, constraint: Option<&str>) -> DbFailure {
    match (code, constraint) {
        (Some(UNDEFINED_TABLE), _) => DbFailure::MissingTable,
        (Some(UNIQUE_VIOLATION), Some(LOCATION_CONSTRAINT)) => DbFailure::LocationTaken,
        (Some(UNIQUE_VIOLATION), _) => DbFailure::SlugTaken,
        _ => DbFailure::Other,
    }
}

pub(crate) fn failure_of(e: &sqlx::Error) -> DbFailure {
    match e {
        sqlx::Error::Database(db) => classify(db.code().as_deref(), db.constraint()),
        _ => DbFailure::Other,
    }
}

/// Logs and wraps an unexpected driver error. Missing tables surface as
/// [`DomainError::NotProvisioned`].
pub(crate) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    if failure_of(&e) == DbFailure::MissingTable {
        error!("Navigation tables missing while {}: {}", context, e);
        return DomainError::NotProvisioned;
    }
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}
