//! Configuration for the inventory service
//!
//! Settings come from an optional TOML file, then `INVENTORY_*` environment
//! variables, then command line flags (applied by the binary).

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::types::{Error, Result};
use crate::{log_info, log_warn};

/// Available storage backend types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    /// SQLite table
    Sqlite,
    /// JSON document file
    Document,
    /// In-process map, not persisted
    Memory,
}

impl FromStr for StorageType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" | "sql" => Ok(StorageType::Sqlite),
            "document" | "json" => Ok(StorageType::Document),
            "memory" => Ok(StorageType::Memory),
            _ => Err(Error::config(format!(
                "Invalid storage type: {}. Valid options: sqlite, document, memory",
                s
            ))),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(Error::config(format!(
                "Invalid log format: {}. Valid options: pretty, json",
                s
            ))),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Storage configuration
    pub storage: StorageConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP server bind address
    pub http_addr: SocketAddr,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage backend type
    pub storage_type: StorageType,

    /// Directory holding the database or document file
    pub data_dir: PathBuf,

    /// SQLite database file name, relative to `data_dir`
    pub sqlite_file: String,

    /// JSON document file name, relative to `data_dir`
    pub document_file: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format
    pub format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_type: StorageType::Sqlite,
            data_dir: PathBuf::from("./data"),
            sqlite_file: "inventory.db".to_string(),
            document_file: "products.json".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl StorageConfig {
    /// Full path of the SQLite database
    pub fn sqlite_path(&self) -> PathBuf {
        self.data_dir.join(&self.sqlite_file)
    }

    /// Full path of the JSON document
    pub fn document_path(&self) -> PathBuf {
        self.data_dir.join(&self.document_file)
    }
}

impl Config {
    /// Apply `INVENTORY_*` environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup (environment, tests)
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(addr) = lookup("INVENTORY_HTTP_ADDR") {
            self.server.http_addr = addr
                .parse()
                .map_err(|e| Error::config(format!("Invalid HTTP address: {}", e)))?;
        }

        if let Some(storage_type) = lookup("INVENTORY_STORAGE_TYPE") {
            self.storage.storage_type = storage_type.parse()?;
        }

        if let Some(data_dir) = lookup("INVENTORY_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(data_dir);
        }

        if let Some(level) = lookup("INVENTORY_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Some(format) = lookup("INVENTORY_LOG_FORMAT") {
            self.logging.format = format.parse()?;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => return Err(Error::config(format!("Invalid log level: {}", other))),
        }

        if self.storage.sqlite_file.trim().is_empty() {
            return Err(Error::config("sqlite_file must not be empty"));
        }

        if self.storage.document_file.trim().is_empty() {
            return Err(Error::config("document_file must not be empty"));
        }

        Ok(())
    }
}

/// Load configuration from file
pub fn load_config(path: &str) -> Result<Config> {
    let config_str = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read config file: {}", e)))?;
    toml::from_str(&config_str)
        .map_err(|e| Error::config(format!("Failed to parse config file: {}", e)))
}

/// Load configuration from file or use defaults
pub fn load_config_or_default(path: Option<&str>) -> Config {
    match path {
        Some(path) => match load_config(path) {
            Ok(config) => {
                log_info!("Loaded configuration from: {}", path);
                config
            }
            Err(e) => {
                log_warn!("Failed to load config from {}: {}. Using defaults.", path, e);
                Config::default()
            }
        },
        None => {
            log_info!("No config file specified, using defaults");
            Config::default()
        }
    }
}
