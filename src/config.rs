//! Service configuration
//!
//! Configuration is read from an optional YAML file and then overridden by
//! `PAGINATION_*` environment variables. Every section has defaults, so an
//! empty document describes a service on port 8000 backed by an in-memory
//! DuckDB database.

use crate::error::{Error, Result};
use crate::pagination::LimitPolicy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

/// Table names are interpolated into SQL, so they must be plain identifiers
static TABLE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$").unwrap()
});

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Storage settings
    #[serde(default)]
    pub database: DatabaseSettings,

    /// Pagination settings
    #[serde(default)]
    pub pagination: PaginationSettings,
}

// ============================================================================
// Server
// ============================================================================

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

// ============================================================================
// Database
// ============================================================================

/// Supported storage engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    /// Native DuckDB (file or in-memory)
    #[default]
    Duckdb,
    /// PostgreSQL attached through DuckDB
    Postgres,
    /// MySQL attached through DuckDB
    Mysql,
    /// SQLite attached through DuckDB
    Sqlite,
}

impl std::str::FromStr for DatabaseKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "duckdb" => Ok(Self::Duckdb),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "mysql" | "mariadb" => Ok(Self::Mysql),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(Error::invalid_config(
                "database.engine",
                format!("unknown engine '{other}'"),
            )),
        }
    }
}

/// Storage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Storage engine
    #[serde(default)]
    pub engine: DatabaseKind,

    /// Full connection string; takes precedence over the components below
    #[serde(default)]
    pub connection_string: Option<String>,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// Database name, or file path for DuckDB/SQLite
    #[serde(default)]
    pub database: Option<String>,

    /// Table backing `/books`
    #[serde(default = "default_books_table")]
    pub books_table: String,

    /// Table backing `/cars`
    #[serde(default = "default_cars_table")]
    pub cars_table: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            engine: DatabaseKind::default(),
            connection_string: None,
            host: None,
            port: None,
            user: None,
            password: None,
            database: None,
            books_table: default_books_table(),
            cars_table: default_cars_table(),
        }
    }
}

fn default_books_table() -> String {
    "books".to_string()
}

fn default_cars_table() -> String {
    "cars".to_string()
}

// ============================================================================
// Pagination
// ============================================================================

/// Pagination settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationSettings {
    /// Largest `limit` served; unset forwards any limit unchanged
    #[serde(default)]
    pub max_limit: Option<i64>,
}

impl PaginationSettings {
    /// Limit policy shared by both strategies
    pub fn limit_policy(&self) -> LimitPolicy {
        LimitPolicy::from_max(self.max_limit)
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load configuration from a YAML file
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load configuration from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<AppConfig> {
    if yaml.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}

impl AppConfig {
    /// Apply `PAGINATION_*` overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (keys as in the environment)
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("PAGINATION_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PAGINATION_PORT") {
            self.server.port = parse_override("PAGINATION_PORT", &port)?;
        }
        if let Some(engine) = lookup("PAGINATION_DB_ENGINE") {
            self.database.engine = engine.parse()?;
        }
        if let Some(url) = lookup("PAGINATION_DB_URL") {
            self.database.connection_string = Some(url);
        }
        if let Some(host) = lookup("PAGINATION_DB_HOST") {
            self.database.host = Some(host);
        }
        if let Some(port) = lookup("PAGINATION_DB_PORT") {
            self.database.port = Some(parse_override("PAGINATION_DB_PORT", &port)?);
        }
        if let Some(user) = lookup("PAGINATION_DB_USER") {
            self.database.user = Some(user);
        }
        if let Some(password) = lookup("PAGINATION_DB_PASSWORD") {
            self.database.password = Some(password);
        }
        if let Some(name) = lookup("PAGINATION_DB_NAME") {
            self.database.database = Some(name);
        }
        if let Some(max) = lookup("PAGINATION_MAX_LIMIT") {
            self.pagination.max_limit = Some(parse_override("PAGINATION_MAX_LIMIT", &max)?);
        }

        self.validate()?;
        Ok(self)
    }

    /// Check values that cannot be expressed through types alone
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::invalid_config("server.port", "must be non-zero"));
        }

        for (field, table) in [
            ("database.books_table", &self.database.books_table),
            ("database.cars_table", &self.database.cars_table),
        ] {
            if !TABLE_NAME.is_match(table) {
                return Err(Error::invalid_config(
                    field,
                    format!("'{table}' is not a valid table name"),
                ));
            }
        }

        if let Some(max) = self.pagination.max_limit {
            if max < 0 {
                return Err(Error::invalid_config(
                    "pagination.max_limit",
                    "must not be negative",
                ));
            }
        }

        Ok(())
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::invalid_config(key, format!("'{value}' is not a valid number")))
}
