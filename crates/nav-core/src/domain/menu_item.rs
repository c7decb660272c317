// ============================================================================
// Nav Core - Menu Item Entity
// File: crates/nav-core/src/domain/menu_item.rs
// Description: One navigation entry, optionally parented within its menu
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use nav_shared::constants::MAX_ITEM_TITLE_LENGTH;
use nav_shared::{ActorId, RecordId};

use super::link::{LinkRequest, LinkType, ResolvedLink};

/// Where the browser opens the link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemTarget {
    #[serde(rename = "self")]
    SelfWindow,
    Blank,
}

impl ItemTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemTarget::SelfWindow => "self",
            ItemTarget::Blank => "blank",
        }
    }

    /// Accepts both `blank` and the HTML spelling `_blank`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().trim_start_matches('_').to_ascii_lowercase().as_str() {
            "self" | "" => Some(ItemTarget::SelfWindow),
            "blank" => Some(ItemTarget::Blank),
            _ => None,
        }
    }
}

impl Default for ItemTarget {
    fn default() -> Self {
        ItemTarget::SelfWindow
    }
}

/// Menu Item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MenuItem {
    /// `0` until persisted.
    pub id: RecordId,
    pub menu_id: RecordId,
    pub parent_id: Option<RecordId>,

    #[validate(length(min = 1, max = MAX_ITEM_TITLE_LENGTH, message = "Title is required (max 255 characters)"))]
    pub title: String,

    pub link_type: LinkType,

    #[validate(length(max = 190, message = "Link reference too long"))]
    pub link_reference: String,

    #[validate(length(max = 2048, message = "URL too long"))]
    pub url: String,

    pub target: ItemTarget,

    #[validate(length(max = 100, message = "CSS class too long"))]
    pub css_class: String,

    pub sort_order: i32,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: Option<ActorId>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<ActorId>,
}

impl MenuItem {
    /// Builds an unsaved item from an already-resolved link.
    pub fn new(
        menu_id: RecordId,
        parent_id: Option<RecordId>,
        title: String,
        link: &ResolvedLink,
        target: ItemTarget,
        css_class: String,
        sort_order: i32,
        created_by: ActorId,
    ) -> Result<Self, validator::ValidationErrors> {
        let item = Self {
            id: 0,
            menu_id,
            parent_id,
            title: title.trim().to_string(),
            link_type: link.link_type,
            link_reference: link.reference.clone(),
            url: link.url.clone(),
            target,
            css_class: css_class.trim().to_string(),
            sort_order,
            created_at: Utc::now(),
            created_by: Some(created_by),
            modified_at: None,
            modified_by: None,
        };

        item.validate()?;
        Ok(item)
    }

    /// Stored destination, as fed back into the resolver on reads.
    pub fn link_request(&self) -> LinkRequest {
        LinkRequest::new(self.link_type, self.link_reference.clone(), self.url.clone())
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn touch(&mut self, modified_by: ActorId) {
        self.modified_at = Some(Utc::now());
        self.modified_by = Some(modified_by);
    }
}

/// Form input for creating or updating a menu item
#[derive(Debug, Clone, Default)]
pub struct MenuItemInput {
    pub title: String,
    pub link: LinkRequest,
    pub target: ItemTarget,
    pub css_class: String,
    pub parent_id: Option<RecordId>,
    /// Appended after the last sibling when absent.
    pub sort_order: Option<i32>,
}

/// One row of a bulk reorder submitted by the menu editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPosition {
    pub id: RecordId,
    pub parent_id: Option<RecordId>,
    pub sort_order: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_target_parsing() {
        assert_eq!(ItemTarget::from_str("_blank"), Some(ItemTarget::Blank));
        assert_eq!(ItemTarget::from_str("self"), Some(ItemTarget::SelfWindow));
        assert_eq!(ItemTarget::from_str(""), Some(ItemTarget::SelfWindow));
        assert_eq!(ItemTarget::from_str("_top"), None);
        assert_eq!(serde_json::to_string(&ItemTarget::SelfWindow).unwrap(), "\"self\"");
    }

    #[test]
    fn test_create_item_copies_link() {
        let link = ResolvedLink::valid(LinkType::Page, "4".into(), "/pages/about".into());
        let item = MenuItem::new(
            1,
            None,
            " About ".into(),
            &link,
            ItemTarget::Blank,
            " nav-about ".into(),
            2,
            Uuid::new_v4(),
        )
        .unwrap();

        assert_eq!(item.title, "About");
        assert_eq!(item.link_reference, "4");
        assert_eq!(item.url, "/pages/about");
        assert_eq!(item.css_class, "nav-about");
        assert!(item.is_root());
        assert_eq!(item.link_request(), LinkRequest::new(LinkType::Page, "4", "/pages/about"));
    }

    #[test]
    fn test_empty_title_rejected() {
        let link = ResolvedLink::valid(LinkType::Custom, String::new(), "/x".into());
        let errors = MenuItem::new(1, None, "  ".into(), &link, ItemTarget::default(), String::new(), 0, Uuid::new_v4())
            .unwrap_err();
        assert!(errors.field_errors().contains_key("title"));

        let long = "t".repeat(MAX_ITEM_TITLE_LENGTH as usize + 1);
        let errors = MenuItem::new(1, None, long, &link, ItemTarget::default(), String::new(), 0, Uuid::new_v4())
            .unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }
}
