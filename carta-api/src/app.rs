/// Application state and router builder
///
/// This module defines the shared application state and provides a function
/// to build the Axum router with all routes and middleware.
///
/// The hosted backend is injected as a trait object rather than constructed
/// inside handlers from ambient environment state: one client is built at
/// startup, and tests substitute a scripted double.
///
/// # Example
///
/// ```no_run
/// use carta_api::{app::{build_router, AppState}, config::Config};
/// use carta_shared::backend::SupabaseBackend;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let backend = SupabaseBackend::new(&config.backend.url, &config.backend.service_role_key)?;
/// let state = AppState::new(Arc::new(backend), config);
/// let app = build_router(state);
///
/// // Start server
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```
use crate::{config::Config, middleware::cors::CorsHeadersLayer};
use axum::{
    routing::{any, get},
    Router,
};
use carta_shared::backend::PlatformBackend;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Hosted backend collaborator (data + auth)
    pub backend: Arc<dyn PlatformBackend>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(backend: Arc<dyn PlatformBackend>, config: Config) -> Self {
        Self {
            backend,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                    # Health check (public)
/// └── /v1/                       # API v1 (versioned)
///     └── /admin/
///         └── ANY /delete-user   # Superadmin user deletion
/// ```
///
/// `/delete-user` is registered for every method: the handler answers
/// preflight `OPTIONS` itself and authenticates everything else, so the
/// route stays a single method-agnostic entry point.
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS response headers (every response, not just preflight)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Admin routes; authentication happens inside the handler because the
    // contract fixes the exact order of auth, role, and body validation.
    let admin_routes = Router::new().route("/delete-user", any(routes::admin::delete_user));

    let v1_routes = Router::new().nest("/admin", admin_routes);

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsHeadersLayer::new())
        .with_state(state)
}
