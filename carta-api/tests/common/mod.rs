/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - A scripted `MockBackend` implementing `PlatformBackend`
/// - Test application construction (real router, mock backend)
/// - Request/response helpers
///
/// The mock records every delete that reaches it, in call order, so tests
/// can assert what was deleted and in which order, and that nothing was
/// deleted when a precondition failed.
use async_trait::async_trait;
use axum::Router;
use carta_api::app::{build_router, AppState};
use carta_api::config::{ApiConfig, BackendConfig, Config};
use carta_shared::backend::{BackendError, PlatformBackend, TicketReference};
use carta_shared::models::{Identity, Restaurant};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Scripted backend double.
///
/// Results are configured up front with the builder methods; the `fail_*`
/// switches make individual operations return a backend error.
#[derive(Default)]
pub struct MockBackend {
    identities: HashMap<String, Identity>,
    roles: HashMap<String, String>,
    restaurants: HashMap<String, Vec<Restaurant>>,
    fail_restaurant_query: bool,
    fail_ticket_deletes: bool,
    fail_user_row_delete: bool,
    fail_identity_delete: bool,
    calls: Mutex<Vec<String>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token that resolves to the given identity.
    pub fn with_identity(mut self, token: &str, user_id: &str) -> Self {
        self.identities.insert(
            token.to_string(),
            Identity {
                id: user_id.to_string(),
                email: None,
            },
        );
        self
    }

    /// Registers a role row for a user.
    pub fn with_role(mut self, user_id: &str, role: &str) -> Self {
        self.roles.insert(user_id.to_string(), role.to_string());
        self
    }

    /// Registers a token resolving to a user with the superadmin role.
    pub fn with_superadmin(self, token: &str, user_id: &str) -> Self {
        self.with_identity(token, user_id).with_role(user_id, "superadmin")
    }

    /// Registers restaurants owned by a user.
    pub fn with_restaurants(mut self, owner_id: &str, restaurants: Vec<Restaurant>) -> Self {
        self.restaurants.insert(owner_id.to_string(), restaurants);
        self
    }

    pub fn failing_restaurant_query(mut self) -> Self {
        self.fail_restaurant_query = true;
        self
    }

    pub fn failing_ticket_deletes(mut self) -> Self {
        self.fail_ticket_deletes = true;
        self
    }

    pub fn failing_user_row_delete(mut self) -> Self {
        self.fail_user_row_delete = true;
        self
    }

    pub fn failing_identity_delete(mut self) -> Self {
        self.fail_identity_delete = true;
        self
    }

    /// Every delete that reached the backend, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn failure(what: &str) -> BackendError {
        BackendError::Api {
            status: 500,
            body: format!("{} exploded", what),
        }
    }
}

#[async_trait]
impl PlatformBackend for MockBackend {
    async fn verify_token(&self, token: &str) -> Result<Option<Identity>, BackendError> {
        Ok(self.identities.get(token).cloned())
    }

    async fn user_role(&self, user_id: &str) -> Result<Option<String>, BackendError> {
        Ok(self.roles.get(user_id).cloned())
    }

    async fn restaurants_owned_by(&self, owner_id: &str) -> Result<Vec<Restaurant>, BackendError> {
        if self.fail_restaurant_query {
            return Err(Self::failure("restaurants query"));
        }
        Ok(self.restaurants.get(owner_id).cloned().unwrap_or_default())
    }

    async fn delete_support_tickets(
        &self,
        reference: TicketReference,
        user_id: &str,
    ) -> Result<(), BackendError> {
        if self.fail_ticket_deletes {
            return Err(Self::failure("ticket delete"));
        }
        self.record(format!("delete_tickets:{}:{}", reference.column(), user_id));
        Ok(())
    }

    async fn delete_user_row(&self, user_id: &str) -> Result<(), BackendError> {
        if self.fail_user_row_delete {
            return Err(Self::failure("user row delete"));
        }
        self.record(format!("delete_user_row:{}", user_id));
        Ok(())
    }

    async fn delete_identity(&self, user_id: &str) -> Result<(), BackendError> {
        if self.fail_identity_delete {
            return Err(Self::failure("identity delete"));
        }
        self.record(format!("delete_identity:{}", user_id));
        Ok(())
    }
}

/// Test context: the real router wired to a mock backend.
pub struct TestContext {
    pub app: Router,
    pub backend: Arc<MockBackend>,
}

impl TestContext {
    pub fn new(backend: MockBackend) -> Self {
        let backend = Arc::new(backend);
        let state = AppState::new(backend.clone(), test_config());
        let app = build_router(state);

        Self { app, backend }
    }
}

/// Builds a restaurant row for ownership scenarios.
pub fn restaurant(id: &str, name: &str, domain: Option<&str>, slug: Option<&str>) -> Restaurant {
    Restaurant {
        id: id.to_string(),
        name: name.to_string(),
        domain: domain.map(str::to_string),
        slug: slug.map(str::to_string),
    }
}

fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        backend: BackendConfig {
            url: "http://localhost:54321".to_string(),
            service_role_key: "test-service-role-key".to_string(),
        },
    }
}
