//! Route table

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{catalog, health, menu_items, menus};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/menus", get(menus::list_menus).post(menus::create_menu))
        .route(
            "/menus/{id}",
            get(menus::get_menu).put(menus::update_menu).delete(menus::delete_menu),
        )
        .route("/menus/{id}/tree", get(menus::menu_tree))
        .route("/menus/{id}/parent-options", get(menus::parent_options))
        .route(
            "/menus/{id}/items",
            get(menu_items::list_items).post(menu_items::create_item),
        )
        .route("/menus/{id}/items/reorder", put(menu_items::reorder_items))
        .route(
            "/menus/{id}/items/{item_id}",
            put(menu_items::update_item).delete(menu_items::delete_item),
        )
        .route("/locations/{location}", get(menus::menu_at_location))
        .route("/catalog/{link_type}", get(catalog::quick_add));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .nest("/api/v1", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
