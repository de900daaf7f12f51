/// Error handling for the admin API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// Handlers return `Result<T, ApiError>` which automatically converts to
/// the appropriate status code and JSON body.
///
/// Unlike an internal API, the response bodies here are a published
/// contract consumed by the admin frontend: every error renders as
/// `{"error": <message>}`, and the ownership conflict additionally carries
/// machine-readable fields (`cannotDelete`, `reason`, `ownedRestaurants`)
/// so the frontend can present the blocking restaurants. Domain-specific
/// messages are localized to Spanish; backend failures embed the backend's
/// own message rather than masking it.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

use carta_shared::models::Restaurant;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Unauthorized (401) - missing or invalid credentials
    Unauthorized(String),

    /// Forbidden (403) - authenticated but not superadmin
    Forbidden(String),

    /// Bad request (400) - request validation failed
    BadRequest(String),

    /// Bad request (400) - the target user owns restaurants and cannot be
    /// deleted until they are removed or reassigned
    OwnerConflict {
        message: String,
        restaurants: Vec<OwnedRestaurant>,
    },

    /// Internal server error (500) - backend failure or unknown failure
    Internal(String),
}

/// A restaurant blocking a deletion, as reported to the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnedRestaurant {
    /// Row identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Custom domain, falling back to the slug
    pub domain: Option<String>,
}

impl From<Restaurant> for OwnedRestaurant {
    fn from(restaurant: Restaurant) -> Self {
        let domain = restaurant.domain_or_slug().map(str::to_string);
        Self {
            id: restaurant.id,
            name: restaurant.name,
            domain,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::OwnerConflict { message, restaurants } => {
                write!(f, "Owner conflict ({} restaurants): {}", restaurants.len(), message)
            }
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, json!({ "error": msg }))
            }
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, json!({ "error": msg })),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::OwnerConflict { message, restaurants } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": message,
                    "cannotDelete": true,
                    "reason": "owner",
                    "ownedRestaurants": restaurants,
                }),
            ),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
        };

        (status, Json(body)).into_response()
    }
}
