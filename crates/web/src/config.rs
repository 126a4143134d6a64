//! Web application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required (postgres storage only)
//! - `PETCITY_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `PETCITY_STORAGE` - `postgres` or `memory` (default: postgres)
//! - `PETCITY_HOST` - Bind address (default: 127.0.0.1)
//! - `PETCITY_PORT` - Listen port (default: 8080)
//! - `PETCITY_BASE_URL` - Public URL (default: <http://localhost:8080>)
//! - `PETCITY_STATIC_DIR` - Static asset directory (default: crates/web/static)
//! - `PETCITY_SESSION_EXPIRY_HOURS` - Session inactivity expiry (default: 24)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry performance sampling (default: 0.0)

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where owners, dogs and users are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// `PostgreSQL` via sqlx; sessions in `PostgreSQL` too.
    #[default]
    Postgres,
    /// Process-local tables; everything is lost on restart.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("expected `postgres` or `memory`, got `{other}`")),
        }
    }
}

/// Web application configuration.
///
/// Implements `Debug` manually to redact the database URL.
#[derive(Clone)]
pub struct AppConfig {
    /// Storage backend for entities and sessions.
    pub storage: StorageBackend,
    /// `PostgreSQL` connection URL (contains password). `None` for memory storage.
    pub database_url: Option<SecretString>,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL, used for cookie security and referer checks
    pub base_url: Url,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Session inactivity expiry in hours
    pub session_expiry_hours: i64,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Sentry traces sample rate
    pub sentry_traces_sample_rate: f32,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("storage", &self.storage)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("host", &self.host)
            .field("port", &self.port)
            .field("base_url", &self.base_url.as_str())
            .field("static_dir", &self.static_dir)
            .field("session_expiry_hours", &self.session_expiry_hours)
            .field("sentry_dsn", &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"))
            .field("sentry_environment", &self.sentry_environment)
            .field("sentry_traces_sample_rate", &self.sentry_traces_sample_rate)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let storage: StorageBackend = env.parse_or_default("PETCITY_STORAGE", "postgres")?;
        let database_url = match storage {
            StorageBackend::Postgres => Some(env.database_url("PETCITY_DATABASE_URL")?),
            StorageBackend::Memory => env.database_url("PETCITY_DATABASE_URL").ok(),
        };

        let host = env.parse_or_default("PETCITY_HOST", "127.0.0.1")?;
        let port = env.parse_or_default("PETCITY_PORT", "8080")?;
        let base_url: Url = env.parse_or_default("PETCITY_BASE_URL", "http://localhost:8080")?;
        if base_url.host_str().is_none() {
            return Err(ConfigError::InvalidEnvVar(
                "PETCITY_BASE_URL".to_owned(),
                "must have a host".to_owned(),
            ));
        }

        let static_dir = PathBuf::from(env.or_default("PETCITY_STATIC_DIR", "crates/web/static"));
        let session_expiry_hours: i64 = env.parse_or_default("PETCITY_SESSION_EXPIRY_HOURS", "24")?;
        if session_expiry_hours <= 0 {
            return Err(ConfigError::InvalidEnvVar(
                "PETCITY_SESSION_EXPIRY_HOURS".to_owned(),
                "must be positive".to_owned(),
            ));
        }

        Ok(Self {
            storage,
            database_url,
            host,
            port,
            base_url,
            static_dir,
            session_expiry_hours,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_traces_sample_rate: env.parse_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup with the usual required/optional/default helpers.
struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable. Blank values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_owned())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or_default<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.or_default(key, default)
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))
    }

    /// Get database URL with fallback to generic `DATABASE_URL`.
    fn database_url(&self, primary_key: &str) -> Result<SecretString, ConfigError> {
        self.optional(primary_key)
            .or_else(|| self.optional("DATABASE_URL"))
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar(primary_key.to_owned()))
    }
}
