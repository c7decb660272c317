// ============================================================================
// Nav API - Data Transfer Objects
// File: crates/nav-api/src/dto.rs
// ============================================================================

use serde::{Deserialize, Serialize};

use nav_core::domain::{
    FlatItem, ItemPosition, ItemTarget, LinkRequest, LinkType, MenuItemInput,
};
use nav_core::error::{DomainError, FieldErrors};
use nav_shared::RecordId;

/// Create or update payload of a menu item, as posted by the editor form
#[derive(Debug, Default, Deserialize)]
pub struct MenuItemRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link_type: String,
    #[serde(default)]
    pub link_reference: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub css_class: String,
    pub parent_id: Option<RecordId>,
    pub sort_order: Option<i32>,
}

impl MenuItemRequest {
    pub fn into_input(self) -> Result<MenuItemInput, DomainError> {
        let mut errors = FieldErrors::default();

        let link_type = if self.link_type.trim().is_empty() {
            Some(LinkType::Custom)
        } else {
            LinkType::from_str(&self.link_type)
        };
        if link_type.is_none() {
            errors.push("link_type", format!("Unknown link type: {}", self.link_type.trim()));
        }

        let target = ItemTarget::from_str(&self.target);
        if target.is_none() {
            errors.push("target", "Target must be \"self\" or \"blank\"");
        }

        match (link_type, target) {
            (Some(link_type), Some(target)) => Ok(MenuItemInput {
                title: self.title,
                link: LinkRequest::new(link_type, self.link_reference, self.url),
                target,
                css_class: self.css_class,
                parent_id: self.parent_id,
                sort_order: self.sort_order,
            }),
            _ => Err(DomainError::ValidationError(errors)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub items: Vec<ItemPosition>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ParentOptionsQuery {
    pub editing: Option<RecordId>,
}

/// One entry of the "parent" selector
#[derive(Debug, Serialize)]
pub struct ParentOption {
    pub id: RecordId,
    pub title: String,
    pub depth: usize,
    /// Title indented by depth, ready for a plain `<select>`.
    pub label: String,
}

impl From<FlatItem> for ParentOption {
    fn from(flat: FlatItem) -> Self {
        Self {
            id: flat.item.id,
            label: format!("{}{}", "- ".repeat(flat.depth), flat.item.title),
            title: flat.item.title,
            depth: flat.depth,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub id: RecordId,
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_link_type_means_custom() {
        let input = MenuItemRequest {
            title: "Home".into(),
            url: "/".into(),
            ..Default::default()
        }
        .into_input()
        .unwrap();
        assert_eq!(input.link.link_type, LinkType::Custom);
        assert_eq!(input.target, ItemTarget::SelfWindow);
    }

    #[test]
    fn test_unknown_values_are_field_errors() {
        let err = MenuItemRequest {
            link_type: "product".into(),
            target: "_parent".into(),
            ..Default::default()
        }
        .into_input()
        .unwrap_err();
        match err {
            DomainError::ValidationError(errors) => {
                assert!(errors.contains("link_type"));
                assert!(errors.contains("target"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
