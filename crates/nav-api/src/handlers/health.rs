use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// 503 until the navigation tables exist.
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    if state.menus.ready().await {
        (
            StatusCode::OK,
            Json(ApiResponse::success(HealthResponse {
                status: "ready".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::error("NOT_PROVISIONED", "Navigation tables are not provisioned")),
        )
    }
}
