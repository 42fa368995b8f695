//! Configuration for the admin API service.

use std::time::Duration;

use orderdesk_core::DeskConfig;

/// Admin API configuration
#[derive(Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,
    /// Database URL
    pub database_url: String,
    /// Provider endpoints and pricing
    pub desk: DeskConfig,
    /// Bearer token required on `/api` routes, if set
    pub admin_token: Option<String>,
    /// Inbound request timeout
    pub request_timeout: Duration,
    /// Metrics enabled
    pub metrics_enabled: bool,
    /// Apply pending migrations on startup
    pub run_migrations: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = required("DATABASE_URL")?;

        let http_port = std::env::var("HTTP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        // Providers
        let auth_url = required("AUTH_URL")?;
        let auth_service_role_key = required("AUTH_SERVICE_ROLE_KEY")?;
        let analysis_service_url = required("ANALYSIS_SERVICE_URL")?;
        let analysis_service_token = required("ANALYSIS_SERVICE_TOKEN")?;
        let pdf_renderer_url = required("PDF_RENDERER_URL")?;

        let max_directory_pages: u32 = std::env::var("DIRECTORY_MAX_PAGES")
            .unwrap_or_else(|_| "50".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("DIRECTORY_MAX_PAGES"))?;
        if max_directory_pages == 0 {
            return Err(ConfigError::Invalid("DIRECTORY_MAX_PAGES"));
        }

        let admin_token = std::env::var("ADMIN_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECS"))?;

        let metrics_enabled = std::env::var("METRICS_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        let run_migrations = std::env::var("RUN_MIGRATIONS")
            .unwrap_or_else(|_| "false".to_string())
            .parse()
            .unwrap_or(false);

        let desk = DeskConfig::new(
            auth_url,
            auth_service_role_key,
            analysis_service_url,
            analysis_service_token,
            pdf_renderer_url,
        )
        .with_max_directory_pages(max_directory_pages);

        Ok(Self {
            http_port,
            database_url,
            desk,
            admin_token,
            request_timeout: Duration::from_secs(request_timeout_secs),
            metrics_enabled,
            run_migrations,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::Missing(name))
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("http_port", &self.http_port)
            .field("desk", &self.desk)
            .field("admin_token", &self.admin_token.as_ref().map(|_| "[REDACTED]"))
            .field("request_timeout", &self.request_timeout)
            .field("metrics_enabled", &self.metrics_enabled)
            .field("run_migrations", &self.run_migrations)
            .finish_non_exhaustive()
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
