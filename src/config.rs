//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export STORAGE_PATH="./storage/storage.db"
//! export ALIAS_LENGTH="8"
//! export LISTEN="0.0.0.0:8082"
//! export HTTP_USER="admin"
//! export HTTP_PASSWORD="secret"
//! ```
//!
//! ## Optional Variables
//!
//! - `STORAGE_PATH` - SQLite database file (default: `./storage/storage.db`)
//! - `ALIAS_LENGTH` - Length of generated aliases (default: 8, range 1-64)
//! - `LISTEN` - Bind address (default: `0.0.0.0:8082`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `HTTP_USER` / `HTTP_PASSWORD` - Basic auth for write endpoints; set both or neither
//! - `STORAGE_TIMEOUT_MS` - Deadline for each storage call (default: 4000)
//! - `DB_MAX_CONNECTIONS` - SQLite pool size (default: 5)
//! - `DB_BUSY_TIMEOUT_MS` - SQLite busy timeout (default: 5000)

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use subtle::ConstantTimeEq;

use crate::infrastructure::persistence::PoolSettings;
use crate::utils::alias_generator::DEFAULT_ALIAS_LENGTH;

/// Longest alias the generator may be configured to produce.
pub const MAX_ALIAS_LENGTH: usize = 64;

/// Credentials guarding the write endpoints.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub user: String,
    pub password: String,
}

impl BasicAuth {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Returns true when the presented credentials match.
    ///
    /// Both fields are always compared, in constant time.
    pub fn matches(&self, user: &str, password: &str) -> bool {
        let user_ok = self.user.as_bytes().ct_eq(user.as_bytes());
        let password_ok = self.password.as_bytes().ct_eq(password.as_bytes());
        (user_ok & password_ok).into()
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub storage_path: String,
    pub alias_length: usize,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// `None` leaves the write endpoints open.
    pub basic_auth: Option<BasicAuth>,
    /// Deadline applied to every storage call, in milliseconds.
    pub storage_timeout_ms: u64,

    // ── SqlitePool settings ─────────────────────────────────────────────────
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 5).
    pub db_max_connections: u32,
    /// How long a connection waits on a locked database, in milliseconds
    /// (`DB_BUSY_TIMEOUT_MS`, default: 5000).
    pub db_busy_timeout_ms: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if only one of `HTTP_USER` / `HTTP_PASSWORD` is set, or
    /// if a numeric variable does not parse.
    pub fn from_env() -> Result<Self> {
        let storage_path =
            env::var("STORAGE_PATH").unwrap_or_else(|_| "./storage/storage.db".to_string());
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8082".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let basic_auth = Self::load_basic_auth().context("Failed to load HTTP credentials")?;

        Ok(Self {
            storage_path,
            alias_length: parse_env("ALIAS_LENGTH", DEFAULT_ALIAS_LENGTH)?,
            listen_addr,
            log_level,
            log_format,
            basic_auth,
            storage_timeout_ms: parse_env("STORAGE_TIMEOUT_MS", 4000)?,
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", 5)?,
            db_busy_timeout_ms: parse_env("DB_BUSY_TIMEOUT_MS", 5000)?,
        })
    }

    /// Loads basic auth credentials.
    ///
    /// Returns `Ok(None)` when neither variable is set.
    fn load_basic_auth() -> Result<Option<BasicAuth>> {
        match (env::var("HTTP_USER").ok(), env::var("HTTP_PASSWORD").ok()) {
            (Some(user), Some(password)) => Ok(Some(BasicAuth::new(user, password))),
            (None, None) => Ok(None),
            (Some(_), None) => anyhow::bail!("HTTP_PASSWORD must be set when HTTP_USER is set"),
            (None, Some(_)) => anyhow::bail!("HTTP_USER must be set when HTTP_PASSWORD is set"),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `alias_length` is outside 1-64
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `storage_path` is empty
    /// - a timeout or the pool size is zero
    pub fn validate(&self) -> Result<()> {
        if self.alias_length == 0 || self.alias_length > MAX_ALIAS_LENGTH {
            anyhow::bail!(
                "ALIAS_LENGTH must be between 1 and {}, got {}",
                MAX_ALIAS_LENGTH,
                self.alias_length
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.storage_path.trim().is_empty() {
            anyhow::bail!("STORAGE_PATH must not be empty");
        }

        if let Some(ref auth) = self.basic_auth
            && (auth.user.is_empty() || auth.password.is_empty())
        {
            anyhow::bail!("HTTP_USER and HTTP_PASSWORD must not be empty");
        }

        if self.storage_timeout_ms == 0 {
            anyhow::bail!("STORAGE_TIMEOUT_MS must be greater than 0");
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }

        Ok(())
    }

    /// Deadline for a single storage call.
    pub fn storage_timeout(&self) -> Duration {
        Duration::from_millis(self.storage_timeout_ms)
    }

    /// Pool settings derived from the `DB_*` variables.
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.db_max_connections,
            busy_timeout: Duration::from_millis(self.db_busy_timeout_ms),
        }
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Storage: {}", self.storage_path);
        tracing::info!("  Alias length: {}", self.alias_length);

        if let Some(ref auth) = self.basic_auth {
            tracing::info!("  Basic auth: {}:*** (enabled)", auth.user);
        } else {
            tracing::info!("  Basic auth: disabled");
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Storage timeout: {}ms", self.storage_timeout_ms);
    }
}

/// Reads and parses `key`, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a number, got '{value}'")),
        Err(_) => Ok(default),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are inconsistent or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
