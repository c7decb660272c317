// ============================================================================
// Nav Infrastructure - In-Memory Navigation Store
// File: crates/nav-infrastructure/src/memory/store.rs
// Description: Menus and items held in process, behind one lock, with the
//              same uniqueness and cascade rules as the SQL schema
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, info};

use nav_core::domain::{ItemPosition, Menu, MenuItem};
use nav_core::error::DomainError;
use nav_core::repositories::{MenuItemRepository, MenuRepository};
use nav_shared::RecordId;

#[derive(Debug)]
struct State {
    provisioned: bool,
    next_menu_id: RecordId,
    next_item_id: RecordId,
    menus: BTreeMap<RecordId, Menu>,
    items: BTreeMap<RecordId, MenuItem>,
}

impl State {
    fn new(provisioned: bool) -> Self {
        Self {
            provisioned,
            next_menu_id: 1,
            next_item_id: 1,
            menus: BTreeMap::new(),
            items: BTreeMap::new(),
        }
    }

    fn require_provisioned(&self) -> Result<(), DomainError> {
        if self.provisioned {
            Ok(())
        } else {
            Err(DomainError::NotProvisioned)
        }
    }

    /// Same rules as `menus_slug_key` and `menus_location_key`.
    fn check_unique(&self, menu: &Menu) -> Result<(), DomainError> {
        for other in self.menus.values().filter(|m| m.id != menu.id) {
            if other.slug == menu.slug {
                return Err(DomainError::SlugTaken(menu.slug.clone()));
            }
            if menu.location.is_some() && other.location == menu.location {
                return Err(DomainError::LocationInUse(menu.location.clone().unwrap_or_default()));
            }
        }
        Ok(())
    }

    /// Same rules as the `menu_items` foreign keys.
    fn check_references(&self, item: &MenuItem) -> Result<(), DomainError> {
        if !self.menus.contains_key(&item.menu_id) {
            return Err(DomainError::DatabaseError(format!(
                "menu_items.menu_id references missing menu {}",
                item.menu_id
            )));
        }
        if let Some(parent) = item.parent_id {
            if !self.items.contains_key(&parent) {
                return Err(DomainError::DatabaseError(format!(
                    "menu_items.parent_id references missing item {}",
                    parent
                )));
            }
        }
        Ok(())
    }
}

/// Shared state behind the memory repositories. Clones share the same data.
#[derive(Clone)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::new(true))),
        }
    }

    /// A store whose tables "do not exist" until [`MemoryStore::provision`].
    pub fn unprovisioned() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::new(false))),
        }
    }

    pub fn provision(&self) {
        self.state.lock().provisioned = true;
    }

    pub fn menus(&self) -> MemoryMenuRepository {
        MemoryMenuRepository { store: self.clone() }
    }

    pub fn items(&self) -> MemoryMenuItemRepository {
        MemoryMenuItemRepository { store: self.clone() }
    }

    /// Raw write used by tests to plant rows the services would refuse.
    pub fn insert_item_unchecked(&self, mut item: MenuItem) -> MenuItem {
        let mut state = self.state.lock();
        if item.id <= 0 {
            item.id = state.next_item_id;
        }
        state.next_item_id = state.next_item_id.max(item.id + 1);
        state.items.insert(item.id, item.clone());
        item
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct MemoryMenuRepository {
    store: MemoryStore,
}

#[derive(Clone)]
pub struct MemoryMenuItemRepository {
    store: MemoryStore,
}

#[async_trait]
impl MenuRepository for MemoryMenuRepository {
    async fn ready(&self) -> Result<bool, DomainError> {
        Ok(self.store.state.lock().provisioned)
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Menu>, DomainError> {
        let state = self.store.state.lock();
        state.require_provisioned()?;
        Ok(state.menus.get(&id).cloned())
    }

    async fn find_by_location(&self, location: &str, exclude_id: Option<RecordId>) -> Result<Option<Menu>, DomainError> {
        let state = self.store.state.lock();
        state.require_provisioned()?;
        Ok(state
            .menus
            .values()
            .find(|m| m.location.as_deref() == Some(location) && Some(m.id) != exclude_id)
            .cloned())
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<RecordId>) -> Result<bool, DomainError> {
        let state = self.store.state.lock();
        state.require_provisioned()?;
        Ok(state
            .menus
            .values()
            .any(|m| m.slug == slug && Some(m.id) != exclude_id))
    }

    async fn list_all(&self) -> Result<Vec<Menu>, DomainError> {
        let state = self.store.state.lock();
        state.require_provisioned()?;
        let mut menus: Vec<Menu> = state.menus.values().cloned().collect();
        menus.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(menus)
    }

    async fn create(&self, menu: &Menu) -> Result<Menu, DomainError> {
        let mut state = self.store.state.lock();
        state.require_provisioned()?;
        state.check_unique(menu)?;

        let mut created = menu.clone();
        created.id = state.next_menu_id;
        state.next_menu_id += 1;
        state.menus.insert(created.id, created.clone());

        debug!("Memory store: menu {} inserted", created.id);
        Ok(created)
    }

    async fn update(&self, menu: &Menu) -> Result<Menu, DomainError> {
        let mut state = self.store.state.lock();
        state.require_provisioned()?;
        if !state.menus.contains_key(&menu.id) {
            return Err(DomainError::MenuNotFound(menu.id));
        }
        state.check_unique(menu)?;
        state.menus.insert(menu.id, menu.clone());
        Ok(menu.clone())
    }

    async fn delete(&self, id: RecordId) -> Result<bool, DomainError> {
        let mut state = self.store.state.lock();
        state.require_provisioned()?;
        if state.menus.remove(&id).is_none() {
            return Ok(false);
        }
        let before = state.items.len();
        state.items.retain(|_, item| item.menu_id != id);
        info!("Memory store: menu {} deleted with {} items", id, before - state.items.len());
        Ok(true)
    }
}

#[async_trait]
impl MenuItemRepository for MemoryMenuItemRepository {
    async fn list_for_menu(&self, menu_id: RecordId) -> Result<Vec<MenuItem>, DomainError> {
        let state = self.store.state.lock();
        state.require_provisioned()?;
        let mut items: Vec<MenuItem> = state
            .items
            .values()
            .filter(|i| i.menu_id == menu_id)
            .cloned()
            .collect();
        items.sort_by_key(|i| (i.sort_order, i.id));
        Ok(items)
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<MenuItem>, DomainError> {
        let state = self.store.state.lock();
        state.require_provisioned()?;
        Ok(state.items.get(&id).cloned())
    }

    async fn create(&self, item: &MenuItem) -> Result<MenuItem, DomainError> {
        let mut state = self.store.state.lock();
        state.require_provisioned()?;
        state.check_references(item)?;

        let mut created = item.clone();
        created.id = state.next_item_id;
        state.next_item_id += 1;
        state.items.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, item: &MenuItem) -> Result<MenuItem, DomainError> {
        let mut state = self.store.state.lock();
        state.require_provisioned()?;
        if !state.items.contains_key(&item.id) {
            return Err(DomainError::MenuItemNotFound(item.id));
        }
        state.check_references(item)?;
        state.items.insert(item.id, item.clone());
        Ok(item.clone())
    }

    async fn delete_promoting_children(&self, id: RecordId) -> Result<bool, DomainError> {
        let mut state = self.store.state.lock();
        state.require_provisioned()?;
        if state.items.remove(&id).is_none() {
            return Ok(false);
        }
        for child in state.items.values_mut().filter(|i| i.parent_id == Some(id)) {
            child.parent_id = None;
        }
        Ok(true)
    }

    async fn apply_positions(&self, menu_id: RecordId, positions: &[ItemPosition]) -> Result<(), DomainError> {
        let mut state = self.store.state.lock();
        state.require_provisioned()?;

        // Validate everything first so a bad entry leaves nothing half-applied.
        for position in positions {
            match state.items.get(&position.id) {
                Some(item) if item.menu_id == menu_id => {}
                _ => return Err(DomainError::MenuItemNotFound(position.id)),
            }
        }

        for position in positions {
            if let Some(item) = state.items.get_mut(&position.id) {
                item.parent_id = position.parent_id;
                item.sort_order = position.sort_order;
            }
        }
        Ok(())
    }
}
