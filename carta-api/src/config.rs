/// Configuration management for the admin API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `SUPABASE_URL`: Base URL of the hosted backend project
/// - `SUPABASE_SERVICE_ROLE_KEY`: Privileged service credential
/// - `RUST_LOG`: Log level (default: info)
///
/// The backend pair defaults to empty strings instead of failing at
/// startup: a misconfigured deployment still boots and answers requests,
/// and the missing credential surfaces as a 401/500 on the first delegated
/// call.
///
/// # Example
///
/// ```no_run
/// use carta_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}:{}", config.api.host, config.api.port);
/// # Ok(())
/// # }
/// ```
use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Hosted backend configuration
    pub backend: BackendConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Hosted backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend project (row API + auth API)
    pub url: String,

    /// Service-role key used for privileged backend calls
    pub service_role_key: String,
}

impl BackendConfig {
    /// Whether both backend credentials are present.
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.service_role_key.is_empty()
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error only when a variable is present but unparseable
    /// (e.g. a non-numeric `API_PORT`). Absent backend credentials are not
    /// an error; see the module docs.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let backend_url = env::var("SUPABASE_URL").unwrap_or_default();
        let service_role_key = env::var("SUPABASE_SERVICE_ROLE_KEY").unwrap_or_default();

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
            },
            backend: BackendConfig {
                url: backend_url,
                service_role_key,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}
