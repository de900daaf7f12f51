//! # Carta Admin API Server
//!
//! This is the admin API server for the Carta restaurant platform. It hosts
//! the privileged operations the operator frontend needs (currently
//! superadmin user deletion) and delegates every data and identity
//! operation to the hosted backend project.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p carta-api
//! ```

use carta_api::{
    app::{build_router, AppState},
    config::Config,
};
use carta_shared::backend::SupabaseBackend;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carta_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Carta Admin API v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    if !config.backend.is_configured() {
        // Boot anyway: the missing credential surfaces per-request, which is
        // what the frontend contract expects.
        tracing::warn!("backend credentials are not fully configured; delegated calls will fail");
    }

    let backend = SupabaseBackend::new(&config.backend.url, &config.backend.service_role_key)?;
    let bind_addr = config.bind_address();

    let state = AppState::new(Arc::new(backend), config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
