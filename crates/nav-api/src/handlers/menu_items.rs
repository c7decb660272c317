//! Menu item CRUD and reordering

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use nav_core::domain::MenuItem;
use nav_shared::RecordId;

use crate::dto::{DeletedResponse, MenuItemRequest, ReorderRequest};
use crate::error::ApiError;
use crate::extract::{Admin, JsonBody};
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/menus/{id}/items
pub async fn list_items(
    State(state): State<AppState>,
    Path(menu_id): Path<RecordId>,
) -> Result<Json<ApiResponse<Vec<MenuItem>>>, ApiError> {
    let items = state.items.list_for_menu(menu_id).await?;
    Ok(Json(ApiResponse::success(items)))
}

/// POST /api/v1/menus/{id}/items
pub async fn create_item(
    State(state): State<AppState>,
    Admin(ctx): Admin,
    Path(menu_id): Path<RecordId>,
    JsonBody(payload): JsonBody<MenuItemRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MenuItem>>), ApiError> {
    let item = state.items.create(&ctx, menu_id, payload.into_input()?).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(item))))
}

/// PUT /api/v1/menus/{id}/items/{item_id}
pub async fn update_item(
    State(state): State<AppState>,
    Admin(ctx): Admin,
    Path((menu_id, item_id)): Path<(RecordId, RecordId)>,
    JsonBody(payload): JsonBody<MenuItemRequest>,
) -> Result<Json<ApiResponse<MenuItem>>, ApiError> {
    let item = state
        .items
        .update(&ctx, menu_id, item_id, payload.into_input()?)
        .await?;
    Ok(Json(ApiResponse::success(item)))
}

/// DELETE /api/v1/menus/{id}/items/{item_id}
pub async fn delete_item(
    State(state): State<AppState>,
    Admin(ctx): Admin,
    Path((menu_id, item_id)): Path<(RecordId, RecordId)>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ApiError> {
    state.items.delete(&ctx, menu_id, item_id).await?;
    Ok(Json(ApiResponse::success(DeletedResponse { id: item_id, deleted: true })))
}

/// PUT /api/v1/menus/{id}/items/reorder
pub async fn reorder_items(
    State(state): State<AppState>,
    Admin(ctx): Admin,
    Path(menu_id): Path<RecordId>,
    JsonBody(payload): JsonBody<ReorderRequest>,
) -> Result<Json<ApiResponse<Vec<MenuItem>>>, ApiError> {
    let items = state.items.reorder(&ctx, menu_id, &payload.items).await?;
    Ok(Json(ApiResponse::success(items)))
}
