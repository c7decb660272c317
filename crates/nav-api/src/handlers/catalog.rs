//! Quick-add panel listings

use axum::{
    extract::{Path, State},
    Json,
};

use nav_core::domain::{CatalogEntry, LinkType};
use nav_core::error::DomainError;

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/catalog/{link_type}
pub async fn quick_add(
    State(state): State<AppState>,
    Path(link_type): Path<String>,
) -> Result<Json<ApiResponse<Vec<CatalogEntry>>>, ApiError> {
    let link_type = LinkType::from_str(&link_type)
        .ok_or_else(|| DomainError::field("link_type", format!("Unknown link type: {}", link_type)))?;

    let entries = state.catalog.quick_add(link_type).await?;
    Ok(Json(ApiResponse::success(entries)))
}
