//! Quick-add catalog entries

use serde::{Deserialize, Serialize};

use nav_shared::RecordId;

use super::link::ContentKind;

/// Publishable content offered in the "quick add" panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub kind: ContentKind,
    pub id: RecordId,
    pub title: String,
    pub url: String,
}
