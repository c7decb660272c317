//! Read-side shapes produced for rendering and parent selectors

use serde::Serialize;

use nav_shared::RecordId;

use super::link::ResolvedLink;
use super::menu::Menu;
use super::menu_item::{ItemTarget, MenuItem};

/// Item in pre-order with its depth (root = 0)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatItem {
    #[serde(flatten)]
    pub item: MenuItem,
    pub depth: usize,
}

/// Flattened item with its link resolved for display
#[derive(Debug, Clone, Serialize)]
pub struct RenderedItem {
    pub id: RecordId,
    pub parent_id: Option<RecordId>,
    pub title: String,
    pub depth: usize,
    pub url: String,
    pub target: ItemTarget,
    pub css_class: String,
    pub sort_order: i32,
    pub link: ResolvedLink,
}

impl RenderedItem {
    pub fn new(flat: FlatItem, link: ResolvedLink) -> Self {
        let FlatItem { item, depth } = flat;
        Self {
            id: item.id,
            parent_id: item.parent_id,
            title: item.title,
            depth,
            url: link.url.clone(),
            target: item.target,
            css_class: item.css_class,
            sort_order: item.sort_order,
            link,
        }
    }
}

/// A menu with its resolved, flattened tree
#[derive(Debug, Clone, Serialize)]
pub struct MenuView {
    pub menu: Menu,
    pub items: Vec<RenderedItem>,
}

impl MenuView {
    pub fn invalid_count(&self) -> usize {
        self.items.iter().filter(|i| !i.link.valid).count()
    }
}
