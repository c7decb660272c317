// ============================================================================
// Nav API - Error Responses
// File: crates/nav-api/src/error.rs
// ============================================================================

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use nav_core::error::DomainError;

use crate::response::{ApiResponse, ErrorBody};

const INTERNAL_MESSAGE: &str = "An internal error occurred";
const DESERIALIZE_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Body that is not JSON or does not fit the request shape.
    #[error("Invalid request body: {message}")]
    InvalidBody {
        status: StatusCode,
        field: Option<String>,
        message: String,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::InvalidBody { status, .. } => *status,
            ApiError::Domain(e) => match e {
                DomainError::MenuNotFound(_)
                | DomainError::MenuNotFoundForLocation(_)
                | DomainError::MenuItemNotFound(_) => StatusCode::NOT_FOUND,
                DomainError::LocationTaken { .. }
                | DomainError::LocationInUse(_)
                | DomainError::SlugTaken(_)
                | DomainError::UnableToGenerateUniqueSlug(_) => StatusCode::CONFLICT,
                DomainError::InvalidLink { .. } | DomainError::ValidationError(_) => StatusCode::BAD_REQUEST,
                DomainError::NotProvisioned => StatusCode::SERVICE_UNAVAILABLE,
                DomainError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::InvalidBody { .. } => "VALIDATION_ERROR",
            ApiError::Domain(e) => match e {
                DomainError::MenuNotFound(_) | DomainError::MenuNotFoundForLocation(_) => "MENU_NOT_FOUND",
                DomainError::MenuItemNotFound(_) => "MENU_ITEM_NOT_FOUND",
                DomainError::LocationTaken { .. } | DomainError::LocationInUse(_) => "LOCATION_TAKEN",
                DomainError::SlugTaken(_) | DomainError::UnableToGenerateUniqueSlug(_) => "SLUG_CONFLICT",
                DomainError::InvalidLink { .. } => "INVALID_LINK",
                DomainError::ValidationError(_) => "VALIDATION_ERROR",
                DomainError::NotProvisioned => "NOT_PROVISIONED",
                DomainError::DatabaseError(_) => "INTERNAL_ERROR",
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let body = match &self {
            ApiError::Unauthorized(msg) => {
                warn!("Unauthorized: {}", msg);
                ErrorBody {
                    code: code.to_string(),
                    message: msg.clone(),
                    field: None,
                    fields: None,
                }
            }
            ApiError::InvalidBody { field, message, .. } => {
                warn!("Invalid request body: {}", message);
                ErrorBody {
                    code: code.to_string(),
                    message: message.clone(),
                    field: field.clone(),
                    fields: None,
                }
            }
            ApiError::Domain(e) if e.is_persistence() => {
                // Details stay in the log.
                error!("Request failed: {}", e);
                ErrorBody {
                    code: code.to_string(),
                    message: INTERNAL_MESSAGE.to_string(),
                    field: None,
                    fields: None,
                }
            }
            ApiError::Domain(e) => {
                if status == StatusCode::SERVICE_UNAVAILABLE {
                    error!("Request refused: {}", e);
                } else {
                    warn!("Request rejected: {}", e);
                }
                ErrorBody {
                    code: code.to_string(),
                    message: e.user_message(),
                    field: e.field_name().map(String::from),
                    fields: match e {
                        DomainError::ValidationError(errors) if !errors.is_empty() => Some(errors.clone()),
                        _ => None,
                    },
                }
            }
        };

        (status, Json(ApiResponse::<()>::failure(body))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match &rejection {
            JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };
        let text = rejection.body_text();
        let detail = text.strip_prefix(DESERIALIZE_PREFIX).unwrap_or(&text);

        ApiError::InvalidBody {
            status,
            field: body_field(detail).map(String::from),
            message: detail.to_string(),
        }
    }
}

/// Field named by a serde error: `location: invalid type ...` or
/// ``missing field `name` ``.
fn body_field(detail: &str) -> Option<&str> {
    if let Some(rest) = detail.split("missing field `").nth(1) {
        return rest.split('`').next().filter(|f| !f.is_empty());
    }
    let (path, _) = detail.split_once(": ")?;
    let field = path.split(['.', '[']).next()?;
    let simple = !field.is_empty() && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    simple.then_some(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nav_core::domain::LinkIssue;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::MenuNotFound(1), StatusCode::NOT_FOUND),
            (DomainError::SlugTaken("main".into()), StatusCode::CONFLICT),
            (
                DomainError::LocationTaken { location: "primary".into(), menu_id: 1, menu_name: "Main".into() },
                StatusCode::CONFLICT,
            ),
            (DomainError::InvalidLink { reason: LinkIssue::Missing }, StatusCode::BAD_REQUEST),
            (DomainError::field("name", "required"), StatusCode::BAD_REQUEST),
            (DomainError::NotProvisioned, StatusCode::SERVICE_UNAVAILABLE),
            (DomainError::DatabaseError("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status(), status);
        }
        assert_eq!(ApiError::Unauthorized("x".into()).status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_body_field_from_serde_message() {
        assert_eq!(
            body_field("location: invalid type: integer `5`, expected a string at line 1 column 27"),
            Some("location")
        );
        assert_eq!(body_field("items[0].id: invalid type: string \"x\""), Some("items"));
        assert_eq!(body_field("missing field `name` at line 1 column 2"), Some("name"));
        assert_eq!(body_field("expected value at line 1 column 1"), None);
    }
}
