//! Request extractors

use axum::{
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
};
use uuid::Uuid;

use nav_core::domain::AdminContext;
use nav_shared::constants::ADMIN_ACTOR_HEADER;

use crate::error::ApiError;

/// The administrator performing a mutation, as asserted by the upstream auth
/// gateway in the `X-Admin-Actor` header.
#[derive(Debug, Clone, Copy)]
pub struct Admin(pub AdminContext);

impl<S> FromRequestParts<S> for Admin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(ADMIN_ACTOR_HEADER)
            .ok_or_else(|| ApiError::Unauthorized("Missing admin actor".to_string()))?;

        let actor_id = raw
            .to_str()
            .ok()
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .filter(|id| !id.is_nil())
            .ok_or_else(|| ApiError::Unauthorized("Malformed admin actor".to_string()))?;

        Ok(Admin(AdminContext::new(actor_id)))
    }
}

/// `axum::Json` for request bodies, rejecting with the API error envelope
/// instead of axum's plain-text 422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
