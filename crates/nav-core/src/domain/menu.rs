// ============================================================================
// Nav Core - Menu Entity
// File: crates/nav-core/src/domain/menu.rs
// Description: Named, location-bound collection of navigation items
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use nav_shared::constants::MAX_MENU_NAME_LENGTH;
use nav_shared::{ActorId, RecordId};

/// Menu entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Menu {
    /// `0` until persisted.
    pub id: RecordId,

    #[validate(length(min = 1, max = 190, message = "Slug must be between 1 and 190 characters"))]
    pub slug: String,

    #[validate(length(min = 1, max = MAX_MENU_NAME_LENGTH, message = "Menu name is required (max 100 characters)"))]
    pub name: String,

    #[validate(length(min = 1, max = 64, message = "Location must be between 1 and 64 characters"))]
    pub location: Option<String>,

    #[validate(length(max = 1000, message = "Description too long"))]
    pub description: Option<String>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: Option<ActorId>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<ActorId>,
}

impl Menu {
    pub fn new(
        name: String,
        slug: String,
        location: Option<String>,
        description: Option<String>,
        created_by: ActorId,
    ) -> Result<Self, validator::ValidationErrors> {
        let menu = Self {
            id: 0,
            slug,
            name: name.trim().to_string(),
            location,
            description: description.map(|d| d.trim().to_string()),
            created_at: Utc::now(),
            created_by: Some(created_by),
            modified_at: None,
            modified_by: None,
        };

        menu.validate()?;
        Ok(menu)
    }

    pub fn apply(
        &mut self,
        name: String,
        slug: String,
        location: Option<String>,
        description: Option<String>,
        modified_by: ActorId,
    ) -> Result<(), validator::ValidationErrors> {
        self.name = name.trim().to_string();
        self.slug = slug;
        self.location = location;
        self.description = description.map(|d| d.trim().to_string());
        self.modified_at = Some(Utc::now());
        self.modified_by = Some(modified_by);
        self.validate()
    }

    pub fn is_placed(&self) -> bool {
        self.location.is_some()
    }
}

/// Form input for creating or updating a menu
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
