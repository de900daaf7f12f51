/// Privileged administrative endpoints
///
/// This module provides the superadmin user-deletion endpoint:
///
/// - `ANY /v1/admin/delete-user` - Delete a user account and its dependent
///   records
///
/// The endpoint is a single method-agnostic entry point: `OPTIONS` gets an
/// empty 200 for preflight, every other method runs the deletion pipeline.
/// Validation is strictly ordered (authentication, then authorization, then
/// body validation, then the ownership precondition) and every failure
/// terminates the request with its own status and body. The cleanup steps
/// that follow run in a fixed order (support tickets, user row, auth
/// identity) with no transaction spanning them: if the identity deletion
/// fails after the row deletion succeeded, the row stays gone and the 500
/// reports the backend's message. No compensating rollback exists.
use crate::{
    app::AppState,
    error::{ApiError, ApiResult, OwnedRestaurant},
};
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use carta_shared::backend::TicketReference;
use carta_shared::models::Identity;

/// The only role allowed to delete users.
const SUPERADMIN_ROLE: &str = "superadmin";

/// Upper bound on request bodies; the expected payload is a single id.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Delete-user response
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteUserResponse {
    /// Always true on the success path
    pub success: bool,

    /// Human-readable confirmation
    pub message: String,
}

/// Superadmin user deletion (method-agnostic entry point)
///
/// # Endpoint
///
/// ```text
/// POST /v1/admin/delete-user
/// Authorization: Bearer <superadmin-jwt>
/// Content-Type: application/json
///
/// {
///   "userId": "uuid-of-target-user"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "message": "User deleted successfully"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing authorization header or invalid token
/// - `403 Forbidden`: Caller is not a superadmin
/// - `400 Bad Request`: Missing `userId`, or the target still owns
///   restaurants (`cannotDelete: true`, `reason: "owner"`, plus the list of
///   blocking restaurants)
/// - `500 Internal Server Error`: Backend failure (the backend's message is
///   embedded) or an unreadable request body
pub async fn delete_user(State(state): State<AppState>, request: Request) -> Response {
    // Preflight gets a bare 200; the CORS layer adds the headers.
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    match run_deletion(&state, request).await {
        Ok(response) => response.into_response(),
        Err(err) => err.into_response(),
    }
}

/// The deletion pipeline. Each step either advances or terminates the
/// request; there are no retries and no concurrent backend calls.
async fn run_deletion(state: &AppState, request: Request) -> ApiResult<Json<DeleteUserResponse>> {
    let (parts, body) = request.into_parts();

    let caller = authenticate(state, &parts.headers).await?;
    authorize(state, &caller).await?;

    let user_id = read_target_user_id(body).await?;
    tracing::info!(
        "superadmin {} requested deletion of user {}",
        caller.id,
        user_id
    );

    check_ownership(state, &user_id).await?;

    // Best-effort cleanup: ticket deletion failures are logged but never
    // fail the request. Creator references go first, then assignee.
    for reference in [TicketReference::CreatedBy, TicketReference::AssignedTo] {
        if let Err(err) = state
            .backend
            .delete_support_tickets(reference, &user_id)
            .await
        {
            tracing::warn!(
                "support ticket cleanup ({}) failed for {}: {}",
                reference.column(),
                user_id,
                err
            );
        }
    }

    state.backend.delete_user_row(&user_id).await.map_err(|err| {
        ApiError::Internal(format!(
            "Error al eliminar el usuario de la base de datos: {}",
            err
        ))
    })?;

    // Past this point the row is gone; an identity failure leaves the
    // account half-deleted and the 500 below is the only signal.
    state.backend.delete_identity(&user_id).await.map_err(|err| {
        ApiError::Internal(format!(
            "Error al eliminar la cuenta de autenticación: {}",
            err
        ))
    })?;

    tracing::info!("user {} deleted", user_id);

    Ok(Json(DeleteUserResponse {
        success: true,
        message: "User deleted successfully".to_string(),
    }))
}

/// Resolves the caller's bearer token to an identity.
///
/// A missing header and a rejected token are distinct 401s; a backend
/// failure during verification is reported as a rejected token rather than
/// a 500, since the caller cannot be told apart from an attacker here.
async fn authenticate(
    state: &AppState,
    headers: &axum::http::HeaderMap,
) -> ApiResult<Identity> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("No authorization header".to_string()))?;

    let token = auth_header.strip_prefix("Bearer ").unwrap_or(auth_header);

    match state.backend.verify_token(token).await {
        Ok(Some(identity)) => {
            tracing::debug!("caller authenticated as {}", identity.id);
            Ok(identity)
        }
        Ok(None) => Err(ApiError::Unauthorized("Invalid token".to_string())),
        Err(err) => {
            tracing::warn!("token verification failed: {}", err);
            Err(ApiError::Unauthorized("Invalid token".to_string()))
        }
    }
}

/// Requires the caller's role row to be exactly `superadmin`.
///
/// A failed lookup and a missing or different role all collapse into the
/// same 403.
async fn authorize(state: &AppState, caller: &Identity) -> ApiResult<()> {
    let role = match state.backend.user_role(&caller.id).await {
        Ok(role) => role,
        Err(err) => {
            tracing::warn!("role lookup failed for {}: {}", caller.id, err);
            None
        }
    };

    if role.as_deref() != Some(SUPERADMIN_ROLE) {
        return Err(ApiError::Forbidden(
            "Unauthorized. Only superadmin can delete users.".to_string(),
        ));
    }

    Ok(())
}

/// Reads and validates the request body.
///
/// A body that is not JSON at all is an unknown failure (500, carrying the
/// parse error); a JSON body without a non-empty string `userId` is a 400.
async fn read_target_user_id(body: Body) -> ApiResult<String> {
    let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    let payload: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|err| ApiError::Internal(err.to_string()))?;

    match payload.get("userId").and_then(serde_json::Value::as_str) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(ApiError::BadRequest(
            "Missing required field: userId".to_string(),
        )),
    }
}

/// Hard block: a user who owns at least one restaurant is never deleted.
///
/// The 400 carries the blocking restaurants so the frontend can offer
/// reassignment; the 500 branch covers a failed ownership query, since
/// deleting without having checked would break the invariant silently.
async fn check_ownership(state: &AppState, user_id: &str) -> ApiResult<()> {
    let owned = state
        .backend
        .restaurants_owned_by(user_id)
        .await
        .map_err(|err| {
            tracing::error!("restaurant ownership check failed for {}: {}", user_id, err);
            ApiError::Internal("Error al verificar los restaurantes del usuario".to_string())
        })?;

    if owned.is_empty() {
        tracing::debug!("user {} owns no restaurants", user_id);
        return Ok(());
    }

    tracing::info!(
        "user {} owns {} restaurant(s), refusing deletion",
        user_id,
        owned.len()
    );

    let message = format!(
        "El usuario es propietario de {} restaurante(s). Elimina o reasigna sus restaurantes antes de eliminar la cuenta.",
        owned.len()
    );

    Err(ApiError::OwnerConflict {
        message,
        restaurants: owned.into_iter().map(OwnedRestaurant::from).collect(),
    })
}
