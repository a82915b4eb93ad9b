//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required (when `PROPERTYHUB_STORE=postgres`, the default)
//! - `PROPERTYHUB_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `PROPERTYHUB_STORE` - `postgres` or `memory` (default: postgres)
//! - `PROPERTYHUB_HOST` - Bind address (default: 127.0.0.1)
//! - `PROPERTYHUB_PORT` - Listen port (default: 5000)
//! - `PROPERTYHUB_UPLOAD_DIR` - Directory for uploaded images (default: uploads)
//! - `PROPERTYHUB_MAX_UPLOAD_BYTES` - Request body limit for uploads (default: 25 MiB)
//! - `PROPERTYHUB_LOG_JSON` - Emit JSON logs when set
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "5000";
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which property store backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// `PostgreSQL` via sqlx.
    Postgres,
    /// Process-local store. Data is lost on restart.
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "postgres" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            _ => Err(format!("unknown store backend: {s} (expected postgres or memory)")),
        }
    }
}

/// API application configuration.
#[derive(Clone)]
pub struct ApiConfig {
    /// Store backend selection
    pub store: StoreBackend,
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: Option<SecretString>,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory where uploaded images are written and served from
    pub upload_dir: PathBuf,
    /// Maximum accepted request body size for multipart uploads
    pub max_upload_bytes: usize,
    /// Emit JSON-formatted logs
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("store", &self.store)
            .field("database_url", &self.database_url.as_ref().map(|_| "[REDACTED]"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("upload_dir", &self.upload_dir)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("log_json", &self.log_json)
            .field("sentry_dsn", &self.sentry_dsn)
            .field("sentry_environment", &self.sentry_environment)
            .finish_non_exhaustive()
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let store = env
            .or_default("PROPERTYHUB_STORE", "postgres")
            .parse::<StoreBackend>()
            .map_err(|e| ConfigError::InvalidEnvVar("PROPERTYHUB_STORE".to_string(), e))?;
        let database_url = match store {
            StoreBackend::Postgres => Some(env.database_url("PROPERTYHUB_DATABASE_URL")?),
            StoreBackend::Memory => env.optional("PROPERTYHUB_DATABASE_URL").map(SecretString::from),
        };
        let host = env.parsed::<IpAddr>("PROPERTYHUB_HOST", DEFAULT_HOST)?;
        let port = env.parsed::<u16>("PROPERTYHUB_PORT", DEFAULT_PORT)?;
        let upload_dir = PathBuf::from(env.or_default("PROPERTYHUB_UPLOAD_DIR", DEFAULT_UPLOAD_DIR));
        let max_upload_bytes = env.parsed::<usize>(
            "PROPERTYHUB_MAX_UPLOAD_BYTES",
            &DEFAULT_MAX_UPLOAD_BYTES.to_string(),
        )?;
        let log_json = env.optional("PROPERTYHUB_LOG_JSON").is_some();
        let sentry_dsn = env.optional("SENTRY_DSN");
        let sentry_environment = env.optional("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = env
            .optional("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = env
            .optional("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            store,
            database_url,
            host,
            port,
            upload_dir,
            max_upload_bytes,
            log_json,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable. Empty values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Get a variable (or its default) parsed into `T`.
    fn parsed<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }

    /// Get database URL with fallback to generic `DATABASE_URL`.
    fn database_url(&self, primary_key: &str) -> Result<SecretString, ConfigError> {
        self.optional(primary_key)
            .or_else(|| self.optional("DATABASE_URL"))
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar(primary_key.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ApiConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("PROPERTYHUB_DATABASE_URL", "postgres://localhost/realestate")]).unwrap();

        assert_eq!(config.store, StoreBackend::Postgres);
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:5000");
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert!(!config.log_json);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "PROPERTYHUB_DATABASE_URL"));
    }

    #[test]
    fn test_database_url_falls_back_to_generic() {
        let config = load(&[("DATABASE_URL", "postgres://db/fallback")]).unwrap();
        assert_eq!(
            config.database_url.unwrap().expose_secret(),
            "postgres://db/fallback"
        );
    }

    #[test]
    fn test_memory_store_needs_no_database() {
        let config = load(&[("PROPERTYHUB_STORE", "memory")]).unwrap();
        assert_eq!(config.store, StoreBackend::Memory);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_unknown_store_backend() {
        let err = load(&[("PROPERTYHUB_STORE", "mongo")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "PROPERTYHUB_STORE"));
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("PROPERTYHUB_STORE", "memory"), ("PROPERTYHUB_PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "PROPERTYHUB_PORT"));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PROPERTYHUB_STORE", "memory"),
            ("PROPERTYHUB_HOST", "0.0.0.0"),
            ("PROPERTYHUB_PORT", "8080"),
            ("PROPERTYHUB_UPLOAD_DIR", "/var/lib/propertyhub/uploads"),
            ("PROPERTYHUB_MAX_UPLOAD_BYTES", "1024"),
            ("PROPERTYHUB_LOG_JSON", "1"),
            ("SENTRY_SAMPLE_RATE", "0.25"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.upload_dir, PathBuf::from("/var/lib/propertyhub/uploads"));
        assert_eq!(config.max_upload_bytes, 1024);
        assert!(config.log_json);
        assert!((config.sentry_sample_rate - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let config = load(&[("PROPERTYHUB_DATABASE_URL", "postgres://user:hunter2@db/app")]).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }
}
