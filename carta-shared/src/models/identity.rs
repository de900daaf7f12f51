/// Authenticated identity resolved from a bearer token
///
/// The auth service returns a full user object; only the fields the admin
/// API actually consumes are modeled here. The `id` is the same opaque
/// identifier used by the row store (`users.id`, `user_roles.user_id`).
use serde::{Deserialize, Serialize};

/// An identity as reported by the backend auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque user identifier, shared across the auth and row stores
    pub id: String,

    /// Email address, when the auth service exposes one
    #[serde(default)]
    pub email: Option<String>,
}
