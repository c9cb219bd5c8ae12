//! User service configuration.
//!
//! Values come from command-line flags (with environment fallbacks) or,
//! when a path is given, from a TOML file.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_USER: &str = "postgres";
pub const DEFAULT_DB_NAME: &str = "user_manage";
pub const DEFAULT_LISTEN_PORT: u16 = 8000;
pub const DEFAULT_DIAG_ADDR: &str = "0.0.0.0:8090";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("read config failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse config failed: {0}")]
    Parse(#[from] toml::de::Error),
}

/// User service configuration.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database host or IP
    pub db_host: String,
    /// Database port
    pub db_port: u16,
    /// Database user
    pub db_user: String,
    /// Password of the database user
    pub db_password: String,
    /// Database name
    pub db_name: String,
    /// Upper bound on pooled database connections
    pub db_max_connections: u32,
    /// HTTP API listen port
    pub listen_port: u16,
    /// Address the diagnostics endpoint binds to
    pub diag_addr: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_user", &self.db_user)
            .field("db_password", &"[REDACTED]")
            .field("db_name", &self.db_name)
            .field("db_max_connections", &self.db_max_connections)
            .field("listen_port", &self.listen_port)
            .field("diag_addr", &self.diag_addr)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_host: DEFAULT_DB_HOST.to_string(),
            db_port: DEFAULT_DB_PORT,
            db_user: DEFAULT_DB_USER.to_string(),
            db_password: String::new(),
            db_name: DEFAULT_DB_NAME.to_string(),
            db_max_connections: DEFAULT_MAX_CONNECTIONS,
            listen_port: DEFAULT_LISTEN_PORT,
            diag_addr: DEFAULT_DIAG_ADDR.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file. Keys absent from the file keep
    /// their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// PostgreSQL connection URL.
    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.db_user, self.db_password, self.db_host, self.db_port, self.db_name
        )
    }

    /// Address the HTTP API binds to.
    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.listen_port)
    }
}
