//! Configuration loading and management
//!
//! Settings come from an optional YAML file, then environment variables
//! override individual fields:
//!
//! | Variable | Field |
//! |---|---|
//! | `BIZTIME_CONFIG` | path of the YAML file |
//! | `BIZTIME_ADDR` | `server.addr` |
//! | `BIZTIME_STORE` | `store` (`memory` or `postgres`) |
//! | `DATABASE_URL` | `database.url` |
//! | `BIZTIME_LOG` | `log_level` |
//!
//! ```yaml
//! server:
//!   addr: 0.0.0.0:3000
//! store: postgres
//! database:
//!   url: postgresql://localhost/biztime
//!   max_connections: 10
//! log_level: debug
//! ```

use crate::core::error::ConfigError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;

pub const CONFIG_PATH_VAR: &str = "BIZTIME_CONFIG";
pub const ADDR_VAR: &str = "BIZTIME_ADDR";
pub const STORE_VAR: &str = "BIZTIME_STORE";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const LOG_VAR: &str = "BIZTIME_LOG";

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Connection settings for the PostgreSQL backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql:///biztime".to_string(),
            max_connections: 5,
        }
    }
}

/// Which record store backend to run against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Memory,
    Postgres,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StoreKind::Memory),
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            other => Err(ConfigError::InvalidValue {
                field: "store".to_string(),
                value: other.to_string(),
                message: "expected 'memory' or 'postgres'".to_string(),
            }),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Memory => write!(f, "memory"),
            StoreKind::Postgres => write!(f, "postgres"),
        }
    }
}

/// Complete configuration of the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreKind,
    pub database: DatabaseConfig,
    /// `tracing_subscriber::EnvFilter` directive, e.g. `info` or `biztime=debug`
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            store: StoreKind::default(),
            database: DatabaseConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// File named by `BIZTIME_CONFIG` (defaults otherwise), then the
    /// process environment on top
    pub fn from_env() -> Result<Self> {
        Self::load(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable lookup
    pub fn load(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from environment-style variables
    ///
    /// Empty values are ignored.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(addr) = var(ADDR_VAR) {
            self.server.addr = addr;
        }
        if let Some(store) = var(STORE_VAR) {
            self.store = store.parse()?;
        }
        if let Some(url) = var(DATABASE_URL_VAR) {
            self.database.url = url;
        }
        if let Some(level) = var(LOG_VAR) {
            self.log_level = level;
        }
        Ok(())
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;

        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.max_connections".to_string(),
                value: "0".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// The listener address, parsed
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .addr
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                field: "server.addr".to_string(),
                value: self.server.addr.clone(),
                message: e.to_string(),
            })
    }
}
