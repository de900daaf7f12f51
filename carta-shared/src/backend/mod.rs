/// Hosted-platform collaborator
///
/// This module defines the contract between the admin API and the hosted
/// backend that owns all of Carta's data and identities. The backend exposes
/// two surfaces: a row API (equality-filtered queries and deletes over the
/// `users`, `user_roles`, `restaurants` and `support_tickets` tables) and an
/// auth API (token verification, identity deletion).
///
/// # Backend Contract
///
/// All backends must:
/// 1. Implement the `PlatformBackend` trait (async)
/// 2. Resolve bearer tokens to identities without side effects
/// 3. Treat deletes as single round trips (no batching, no retries)
/// 4. Surface non-success responses as `BackendError::Api` so callers can
///    relay the backend's own message
///
/// Handlers receive the backend as `Arc<dyn PlatformBackend>`, so tests can
/// substitute a scripted double without an HTTP server.
///
/// # Example
///
/// ```no_run
/// use carta_shared::backend::{PlatformBackend, SupabaseBackend};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend: Arc<dyn PlatformBackend> = Arc::new(SupabaseBackend::new(
///     "https://project.supabase.co",
///     "service-role-key",
/// )?);
///
/// if let Some(identity) = backend.verify_token("caller-jwt").await? {
///     let role = backend.user_role(&identity.id).await?;
///     println!("caller {} has role {:?}", identity.id, role);
/// }
/// # Ok(())
/// # }
/// ```
use async_trait::async_trait;

use crate::models::{Identity, Restaurant};

mod supabase;

pub use supabase::SupabaseBackend;

/// Backend error types
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The request never produced a response (connection, TLS, bad URL)
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("backend returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body did not match the expected shape
    #[error("unexpected backend response: {0}")]
    Decode(String),
}

/// Which support-ticket reference column a delete targets.
///
/// Tickets reference a user twice: once as the creator and once as the
/// assignee. Cleanup deletes both sets, one column at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketReference {
    /// Tickets the user opened (`user_id` column)
    CreatedBy,

    /// Tickets assigned to the user (`assigned_to` column)
    AssignedTo,
}

impl TicketReference {
    /// The backend column this reference filters on.
    pub fn column(&self) -> &'static str {
        match self {
            TicketReference::CreatedBy => "user_id",
            TicketReference::AssignedTo => "assigned_to",
        }
    }
}

/// Core backend trait
///
/// The only seam between the admin API and the hosted platform. Every
/// operation is a single awaited round trip.
#[async_trait]
pub trait PlatformBackend: Send + Sync {
    /// Resolves a caller's bearer token to an identity.
    ///
    /// Returns `Ok(None)` when the token is rejected by the auth service
    /// (invalid, expired, or anonymous). Transport failures are errors.
    async fn verify_token(&self, token: &str) -> Result<Option<Identity>, BackendError>;

    /// Looks up a user's role in the `user_roles` table.
    ///
    /// Returns `Ok(None)` when the user has no role row.
    async fn user_role(&self, user_id: &str) -> Result<Option<String>, BackendError>;

    /// Lists the restaurants whose `owner_id` equals the given user.
    async fn restaurants_owned_by(&self, owner_id: &str) -> Result<Vec<Restaurant>, BackendError>;

    /// Deletes every support ticket referencing the user through the given
    /// column. Deleting zero rows is a success.
    async fn delete_support_tickets(
        &self,
        reference: TicketReference,
        user_id: &str,
    ) -> Result<(), BackendError>;

    /// Deletes the user's row from the `users` table.
    async fn delete_user_row(&self, user_id: &str) -> Result<(), BackendError>;

    /// Deletes the user's identity from the auth service.
    async fn delete_identity(&self, user_id: &str) -> Result<(), BackendError>;
}
