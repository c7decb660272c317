//! # Nav Core
//! 
//! Domain entities, navigation algorithms, services, and repository traits
//! for menu administration.

pub mod domain;
pub mod navigation;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::{DomainError, FieldError, FieldErrors};
