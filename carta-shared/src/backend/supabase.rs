/// Supabase implementation of the platform backend
///
/// Talks to the two HTTP surfaces of a hosted Supabase project:
///
/// - `/rest/v1/<table>`: PostgREST row API, filtered with `column=eq.value`
///   query parameters
/// - `/auth/v1`: GoTrue auth API (`/user` for token verification,
///   `/admin/users/<id>` for identity deletion)
///
/// Privileged calls authenticate with the project's service-role key, sent
/// both as the `apikey` header and as a bearer token. Token verification is
/// the exception: there the caller's own token goes in the `Authorization`
/// header so the auth service resolves *their* identity.
use serde::Deserialize;

use super::{BackendError, PlatformBackend, TicketReference};
use crate::models::{Identity, Restaurant};

/// Backend client for a hosted Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseBackend {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

/// Row shape of the `user_roles` side table.
#[derive(Debug, Deserialize)]
struct RoleRow {
    role: String,
}

impl SupabaseBackend {
    /// Creates a backend client for the given project URL and service-role
    /// key.
    ///
    /// An empty URL or key is accepted: the failure then surfaces on the
    /// first request instead of at startup, which is the behavior the rest
    /// of the service is written against.
    pub fn new(
        base_url: impl Into<String>,
        service_key: impl Into<String>,
    ) -> Result<Self, BackendError> {
        let base_url: String = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            base_url,
            service_key: service_key.into(),
        })
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    /// Maps a non-success response to `BackendError::Api`, preserving the
    /// backend's own message for upstream error reporting.
    async fn ok_or_api_error(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_else(|_| String::new());
        Err(BackendError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait::async_trait]
impl PlatformBackend for SupabaseBackend {
    async fn verify_token(&self, token: &str) -> Result<Option<Identity>, BackendError> {
        let response = self
            .http
            .get(self.auth_url("user"))
            .header("apikey", &self.service_key)
            .bearer_auth(token)
            .send()
            .await?;

        // The auth service rejects bad tokens with 401/403; both simply mean
        // "no identity" to callers.
        if response.status() == reqwest::StatusCode::UNAUTHORIZED
            || response.status() == reqwest::StatusCode::FORBIDDEN
        {
            return Ok(None);
        }

        let response = Self::ok_or_api_error(response).await?;
        let identity = response
            .json::<Identity>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        Ok(Some(identity))
    }

    async fn user_role(&self, user_id: &str) -> Result<Option<String>, BackendError> {
        let filter = format!("eq.{}", user_id);
        let response = self
            .http
            .get(self.rest_url("user_roles"))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .query(&[("user_id", filter.as_str()), ("select", "role")])
            .send()
            .await?;

        let response = Self::ok_or_api_error(response).await?;
        let mut rows = response
            .json::<Vec<RoleRow>>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        if rows.is_empty() {
            return Ok(None);
        }

        Ok(Some(rows.remove(0).role))
    }

    async fn restaurants_owned_by(&self, owner_id: &str) -> Result<Vec<Restaurant>, BackendError> {
        let filter = format!("eq.{}", owner_id);
        let response = self
            .http
            .get(self.rest_url("restaurants"))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .query(&[("owner_id", filter.as_str()), ("select", "id,name,domain,slug")])
            .send()
            .await?;

        let response = Self::ok_or_api_error(response).await?;
        response
            .json::<Vec<Restaurant>>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn delete_support_tickets(
        &self,
        reference: TicketReference,
        user_id: &str,
    ) -> Result<(), BackendError> {
        let filter = format!("eq.{}", user_id);
        let response = self
            .http
            .delete(self.rest_url("support_tickets"))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .query(&[(reference.column(), filter.as_str())])
            .send()
            .await?;

        Self::ok_or_api_error(response).await?;
        tracing::debug!(
            "deleted support tickets where {} = {}",
            reference.column(),
            user_id
        );

        Ok(())
    }

    async fn delete_user_row(&self, user_id: &str) -> Result<(), BackendError> {
        let filter = format!("eq.{}", user_id);
        let response = self
            .http
            .delete(self.rest_url("users"))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .query(&[("id", filter.as_str())])
            .send()
            .await?;

        Self::ok_or_api_error(response).await?;

        Ok(())
    }

    async fn delete_identity(&self, user_id: &str) -> Result<(), BackendError> {
        let response = self
            .http
            .delete(self.auth_url(&format!("admin/users/{}", user_id)))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await?;

        Self::ok_or_api_error(response).await?;

        Ok(())
    }
}
