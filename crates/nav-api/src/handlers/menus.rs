// ============================================================================
// Nav API - Menu Handlers
// File: crates/nav-api/src/handlers/menus.rs
// ============================================================================
//! Menu CRUD and the read-side tree views

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use nav_core::domain::{Menu, MenuInput, MenuView};
use nav_shared::RecordId;

use crate::dto::{DeletedResponse, ParentOption, ParentOptionsQuery};
use crate::error::ApiError;
use crate::extract::{Admin, JsonBody};
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/menus
pub async fn list_menus(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Menu>>>, ApiError> {
    let menus = state.menus.list_all().await?;
    Ok(Json(ApiResponse::success(menus)))
}

/// POST /api/v1/menus
pub async fn create_menu(
    State(state): State<AppState>,
    Admin(ctx): Admin,
    JsonBody(payload): JsonBody<MenuInput>,
) -> Result<(StatusCode, Json<ApiResponse<Menu>>), ApiError> {
    let menu = state.menus.create(&ctx, payload).await?;
    info!("Menu {} created by {}", menu.id, ctx.actor_id);
    Ok((StatusCode::CREATED, Json(ApiResponse::success(menu))))
}

/// GET /api/v1/menus/{id}
pub async fn get_menu(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<Json<ApiResponse<Menu>>, ApiError> {
    let menu = state.menus.find(id).await?;
    Ok(Json(ApiResponse::success(menu)))
}

/// PUT /api/v1/menus/{id}
pub async fn update_menu(
    State(state): State<AppState>,
    Admin(ctx): Admin,
    Path(id): Path<RecordId>,
    JsonBody(payload): JsonBody<MenuInput>,
) -> Result<Json<ApiResponse<Menu>>, ApiError> {
    let menu = state.menus.update(&ctx, id, payload).await?;
    Ok(Json(ApiResponse::success(menu)))
}

/// DELETE /api/v1/menus/{id}
pub async fn delete_menu(
    State(state): State<AppState>,
    Admin(ctx): Admin,
    Path(id): Path<RecordId>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ApiError> {
    state.menus.delete(&ctx, id).await?;
    Ok(Json(ApiResponse::success(DeletedResponse { id, deleted: true })))
}

/// GET /api/v1/menus/{id}/tree
pub async fn menu_tree(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<Json<ApiResponse<MenuView>>, ApiError> {
    let view = state.items.render(id).await?;
    Ok(Json(ApiResponse::success(view)))
}

/// GET /api/v1/menus/{id}/parent-options?editing={item_id}
pub async fn parent_options(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Query(query): Query<ParentOptionsQuery>,
) -> Result<Json<ApiResponse<Vec<ParentOption>>>, ApiError> {
    let options = state
        .items
        .parent_options(id, query.editing)
        .await?
        .into_iter()
        .map(ParentOption::from)
        .collect();
    Ok(Json(ApiResponse::success(options)))
}

/// GET /api/v1/locations/{location}
pub async fn menu_at_location(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> Result<Json<ApiResponse<MenuView>>, ApiError> {
    let view = state.items.render_location(&location).await?;
    Ok(Json(ApiResponse::success(view)))
}
