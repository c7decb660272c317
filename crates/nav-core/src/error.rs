//! Domain errors

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use nav_shared::RecordId;

use crate::domain::LinkIssue;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Menu not found: {0}")]
    MenuNotFound(RecordId),

    #[error("Menu not found for location: {0}")]
    MenuNotFoundForLocation(String),

    #[error("Menu item not found: {0}")]
    MenuItemNotFound(RecordId),

    #[error("Location \"{location}\" is already used by menu \"{menu_name}\"")]
    LocationTaken { location: String, menu_id: RecordId, menu_name: String },

    /// Raised by stores when the location unique index rejects a write.
    #[error("Location already in use: {0}")]
    LocationInUse(String),

    #[error("Slug already exists: {0}")]
    SlugTaken(String),

    #[error("Invalid link: {reason}")]
    InvalidLink { reason: LinkIssue },

    #[error("Validation error: {0}")]
    ValidationError(FieldErrors),

    #[error("Unable to generate unique slug from: {0}")]
    UnableToGenerateUniqueSlug(String),

    #[error("Navigation tables are not provisioned")]
    NotProvisioned,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        DomainError::ValidationError(FieldErrors::single(field, message))
    }

    /// Form field the failure belongs to, when it is a user-correctable one.
    pub fn field_name(&self) -> Option<&str> {
        match self {
            DomainError::LocationTaken { .. } | DomainError::LocationInUse(_) => Some("location"),
            DomainError::SlugTaken(_) | DomainError::UnableToGenerateUniqueSlug(_) => Some("slug"),
            DomainError::InvalidLink { reason: LinkIssue::CustomEmpty } => Some("url"),
            DomainError::InvalidLink { .. } => Some("link_reference"),
            DomainError::ValidationError(errors) => errors.first_field(),
            _ => None,
        }
    }

    /// Message suitable for showing next to the field.
    pub fn user_message(&self) -> String {
        match self {
            DomainError::InvalidLink { reason } => reason.message().to_string(),
            DomainError::ValidationError(errors) => errors
                .iter()
                .next()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| self.to_string()),
            _ => self.to_string(),
        }
    }

    /// Store failures the caller cannot correct.
    pub fn is_persistence(&self) -> bool {
        matches!(self, DomainError::DatabaseError(_))
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.into())
    }
}

/// A message tagged with the form field it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        Self(vec![FieldError {
            field: field.to_string(),
            message: message.into(),
        }])
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn first_field(&self) -> Option<&str> {
        self.0.first().map(|e| e.field.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let mut out = FieldErrors::default();
        for (field, errs) in fields {
            for err in errs {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                out.push(&field, message);
            }
        }
        out
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}
