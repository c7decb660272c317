use std::sync::Arc;

use nav_core::repositories::{ContentCatalog, LinkLookup, MenuItemRepository, MenuRepository};
use nav_core::services::{CatalogService, LinkResolver, MenuItemService, MenuService};
use nav_shared::config::NavigationSettings;

pub type MenuStore = MenuService<dyn MenuRepository>;
pub type MenuItemStore = MenuItemService<dyn MenuRepository, dyn MenuItemRepository>;
pub type QuickAddCatalog = CatalogService<dyn ContentCatalog>;

/// Services shared by every handler; the backing adapters are chosen at boot.
#[derive(Clone)]
pub struct AppState {
    pub menus: Arc<MenuStore>,
    pub items: Arc<MenuItemStore>,
    pub catalog: Arc<QuickAddCatalog>,
}

impl AppState {
    pub fn new(
        menu_repo: Arc<dyn MenuRepository>,
        item_repo: Arc<dyn MenuItemRepository>,
        lookup: Arc<dyn LinkLookup>,
        catalog: Arc<dyn ContentCatalog>,
        settings: &NavigationSettings,
    ) -> Self {
        let resolver = LinkResolver::new(lookup);
        Self {
            menus: Arc::new(MenuService::new(menu_repo.clone(), settings)),
            items: Arc::new(MenuItemService::new(menu_repo, item_repo, resolver)),
            catalog: Arc::new(CatalogService::new(catalog, settings.effective_quick_add_limit())),
        }
    }
}
