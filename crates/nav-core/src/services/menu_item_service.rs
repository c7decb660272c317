// ============================================================================
// Nav Core - Menu Item Service
// File: crates/nav-core/src/services/menu_item_service.rs
// ============================================================================
//! Menu item CRUD, reordering, and the read-side tree views

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use nav_shared::utils::{non_blank, normalize_location};
use nav_shared::RecordId;

use crate::domain::{
    AdminContext, FlatItem, ItemPosition, Menu, MenuItem, MenuItemInput, MenuView,
};
use crate::error::DomainError;
use crate::navigation::{decide_parent, descendant_ids, flatten_items, ParentDecision};
use crate::repositories::{MenuItemRepository, MenuRepository};
use crate::services::link_resolver::LinkResolver;

pub struct MenuItemService<M: MenuRepository + ?Sized, I: MenuItemRepository + ?Sized> {
    menu_repo: Arc<M>,
    item_repo: Arc<I>,
    resolver: LinkResolver,
}

impl<M: MenuRepository + ?Sized, I: MenuItemRepository + ?Sized> MenuItemService<M, I> {
    pub fn new(menu_repo: Arc<M>, item_repo: Arc<I>, resolver: LinkResolver) -> Self {
        Self {
            menu_repo,
            item_repo,
            resolver,
        }
    }

    /// Items ordered by `sort_order`, then `id`.
    pub async fn list_for_menu(&self, menu_id: RecordId) -> Result<Vec<MenuItem>, DomainError> {
        self.require_menu(menu_id).await?;
        self.item_repo.list_for_menu(menu_id).await
    }

    pub async fn create(
        &self,
        ctx: &AdminContext,
        menu_id: RecordId,
        input: MenuItemInput,
    ) -> Result<MenuItem, DomainError> {
        self.require_menu(menu_id).await?;
        let title = required_title(&input)?;
        let link = self.resolver.require_valid(&input.link).await?;

        let items = self.item_repo.list_for_menu(menu_id).await?;
        let parent_id = parent_for(&items, menu_id, None, input.parent_id);
        let sort_order = input
            .sort_order
            .unwrap_or_else(|| next_sort_order(&items, parent_id));

        let item = MenuItem::new(
            menu_id,
            parent_id,
            title,
            &link,
            input.target,
            input.css_class,
            sort_order,
            ctx.actor_id,
        )?;

        let created = self.item_repo.create(&item).await?;
        info!("Menu item {} created in menu {}", created.id, menu_id);
        Ok(created)
    }

    pub async fn update(
        &self,
        ctx: &AdminContext,
        menu_id: RecordId,
        item_id: RecordId,
        input: MenuItemInput,
    ) -> Result<MenuItem, DomainError> {
        self.require_menu(menu_id).await?;
        let mut item = self.require_item(menu_id, item_id).await?;
        let title = required_title(&input)?;
        let link = self.resolver.require_valid(&input.link).await?;

        // Fresh item set on every update; descendant sets are never cached.
        let items = self.item_repo.list_for_menu(menu_id).await?;
        let parent_id = parent_for(&items, menu_id, Some(item_id), input.parent_id);
        let sort_order = match input.sort_order {
            Some(order) => order,
            None if parent_id != item.parent_id => next_sort_order(&items, parent_id),
            None => item.sort_order,
        };

        item.title = title;
        item.parent_id = parent_id;
        item.link_type = link.link_type;
        item.link_reference = link.reference;
        item.url = link.url;
        item.target = input.target;
        item.css_class = input.css_class.trim().to_string();
        item.sort_order = sort_order;
        item.touch(ctx.actor_id);
        validator::Validate::validate(&item)?;

        let updated = self.item_repo.update(&item).await?;
        info!("Menu item {} updated in menu {}", item_id, menu_id);
        Ok(updated)
    }

    /// Removes the item; its direct children move to the root level.
    pub async fn delete(&self, ctx: &AdminContext, menu_id: RecordId, item_id: RecordId) -> Result<(), DomainError> {
        self.require_item(menu_id, item_id).await?;
        if !self.item_repo.delete_promoting_children(item_id).await? {
            return Err(DomainError::MenuItemNotFound(item_id));
        }
        info!("Menu item {} deleted from menu {} by {}", item_id, menu_id, ctx.actor_id);
        Ok(())
    }

    /// Applies a drag-and-drop arrangement. Entries are checked in order
    /// against the arrangement built so far, so the result stays acyclic.
    pub async fn reorder(
        &self,
        ctx: &AdminContext,
        menu_id: RecordId,
        positions: &[ItemPosition],
    ) -> Result<Vec<MenuItem>, DomainError> {
        self.require_menu(menu_id).await?;
        let mut view = self.item_repo.list_for_menu(menu_id).await?;

        let mut applied = Vec::with_capacity(positions.len());
        for position in positions {
            let Some(index) = view.iter().position(|i| i.id == position.id) else {
                return Err(DomainError::MenuItemNotFound(position.id));
            };
            let parent_id = parent_for(&view, menu_id, Some(position.id), position.parent_id);
            view[index].parent_id = parent_id;
            view[index].sort_order = position.sort_order;
            applied.push(ItemPosition {
                id: position.id,
                parent_id,
                sort_order: position.sort_order,
            });
        }

        self.item_repo.apply_positions(menu_id, &applied).await?;
        info!("Menu {} reordered ({} items) by {}", menu_id, applied.len(), ctx.actor_id);
        self.item_repo.list_for_menu(menu_id).await
    }

    /// Choices for the "parent" selector. When editing an item, the item and
    /// everything under it are left out since picking them would form a cycle.
    pub async fn parent_options(
        &self,
        menu_id: RecordId,
        editing: Option<RecordId>,
    ) -> Result<Vec<FlatItem>, DomainError> {
        let items = self.list_for_menu(menu_id).await?;
        let excluded: HashSet<RecordId> = match editing {
            Some(id) => {
                let mut set = descendant_ids(&items, id);
                set.insert(id);
                set
            }
            None => HashSet::new(),
        };

        Ok(flatten_items(items)
            .into_iter()
            .filter(|f| !excluded.contains(&f.item.id))
            .collect())
    }

    /// Flattened tree with every link resolved. Stale links are kept and
    /// flagged rather than hidden.
    pub async fn render(&self, menu_id: RecordId) -> Result<MenuView, DomainError> {
        let menu = self.require_menu(menu_id).await?;
        self.render_menu(menu).await
    }

    /// Tree of the menu placed at `location`, as the public site would show it.
    pub async fn render_location(&self, location: &str) -> Result<MenuView, DomainError> {
        let Some(location) = normalize_location(Some(location)) else {
            return Err(DomainError::MenuNotFoundForLocation(String::new()));
        };
        let menu = self
            .menu_repo
            .find_by_location(&location, None)
            .await?
            .ok_or_else(|| DomainError::MenuNotFoundForLocation(location.clone()))?;
        self.render_menu(menu).await
    }

    pub async fn render_menu(&self, menu: Menu) -> Result<MenuView, DomainError> {
        let items = self.item_repo.list_for_menu(menu.id).await?;
        let rendered = self.resolver.render(flatten_items(items)).await;
        let view = MenuView { menu, items: rendered };

        let invalid = view.invalid_count();
        if invalid > 0 {
            warn!("Menu {} renders with {} invalid link(s)", view.menu.id, invalid);
        }
        Ok(view)
    }

    async fn require_menu(&self, menu_id: RecordId) -> Result<Menu, DomainError> {
        self.menu_repo
            .find_by_id(menu_id)
            .await?
            .ok_or(DomainError::MenuNotFound(menu_id))
    }

    async fn require_item(&self, menu_id: RecordId, item_id: RecordId) -> Result<MenuItem, DomainError> {
        self.item_repo
            .find_by_id(item_id)
            .await?
            .filter(|i| i.menu_id == menu_id)
            .ok_or(DomainError::MenuItemNotFound(item_id))
    }
}

fn required_title(input: &MenuItemInput) -> Result<String, DomainError> {
    non_blank(Some(&input.title)).ok_or_else(|| DomainError::field("title", "Title is required"))
}

fn parent_for(
    items: &[MenuItem],
    menu_id: RecordId,
    item_id: Option<RecordId>,
    candidate: Option<RecordId>,
) -> Option<RecordId> {
    let decision = decide_parent(items, item_id, candidate);
    if let ParentDecision::ResetToRoot(rejection) = decision {
        warn!(
            "Parent {:?} for item {:?} in menu {} rejected ({}); placing at root",
            candidate,
            item_id,
            menu_id,
            rejection.as_str()
        );
    }
    decision.parent_id()
}

fn next_sort_order(items: &[MenuItem], parent_id: Option<RecordId>) -> i32 {
    items
        .iter()
        .filter(|i| i.parent_id == parent_id)
        .map(|i| i.sort_order)
        .max()
        .map_or(0, |max| max.saturating_add(1))
}
