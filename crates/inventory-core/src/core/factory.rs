//! Application Factory
//!
//! Builds the `AppState` for the storage backend named in the configuration.
//! The backend is chosen once at startup; handlers are then monomorphized over
//! the concrete store type.

use std::sync::Arc;

use crate::core::app_state::AppState;
use crate::core::config::{Config, StorageType};
use crate::storage::{DocumentRecordStore, MemoryRecordStore, SqliteRecordStore};
use crate::types::Result;
use crate::log_info;

/// Enum to hold different AppState configurations
pub enum ConfiguredAppState {
    /// Configuration using the SQLite backend
    Sqlite {
        /// The application state with SqliteRecordStore
        app_state: Arc<AppState<SqliteRecordStore>>,
    },
    /// Configuration using the JSON document backend
    Document {
        /// The application state with DocumentRecordStore
        app_state: Arc<AppState<DocumentRecordStore>>,
    },
    /// Configuration using the in-process backend
    Memory {
        /// The application state with MemoryRecordStore
        app_state: Arc<AppState<MemoryRecordStore>>,
    },
}

impl ConfiguredAppState {
    /// Get the HTTP address from config
    pub fn http_addr(&self) -> std::net::SocketAddr {
        self.config().server.http_addr
    }

    /// Configuration the state was built from
    pub fn config(&self) -> &Config {
        match self {
            ConfiguredAppState::Sqlite { app_state } => &app_state.config,
            ConfiguredAppState::Document { app_state } => &app_state.config,
            ConfiguredAppState::Memory { app_state } => &app_state.config,
        }
    }

    /// Backend name of the configured store
    pub fn backend_name(&self) -> &'static str {
        match self {
            ConfiguredAppState::Sqlite { app_state } => app_state.inventory.backend_name(),
            ConfiguredAppState::Document { app_state } => app_state.inventory.backend_name(),
            ConfiguredAppState::Memory { app_state } => app_state.inventory.backend_name(),
        }
    }
}

/// Create AppState based on configuration
///
/// # Errors
///
/// Returns `Error::Storage` when the configured backend cannot be opened.
pub fn create_app_state(config: Config) -> Result<ConfiguredAppState> {
    log_info!("Creating AppState with storage type: {:?}", config.storage.storage_type);

    let configured = match config.storage.storage_type {
        StorageType::Sqlite => {
            let store = SqliteRecordStore::open(config.storage.sqlite_path())?;
            log_info!("SqliteRecordStore initialized at {:?}", store.db_path());
            ConfiguredAppState::Sqlite {
                app_state: Arc::new(AppState::new(Arc::new(store), config)),
            }
        }
        StorageType::Document => {
            let store = DocumentRecordStore::open(config.storage.document_path())?;
            log_info!("DocumentRecordStore initialized at {:?}", store.path());
            ConfiguredAppState::Document {
                app_state: Arc::new(AppState::new(Arc::new(store), config)),
            }
        }
        StorageType::Memory => {
            log_info!("MemoryRecordStore initialized");
            ConfiguredAppState::Memory {
                app_state: Arc::new(AppState::new(Arc::new(MemoryRecordStore::new()), config)),
            }
        }
    };

    log_info!("AppState created successfully");
    Ok(configured)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    fn config_in(dir: &std::path::Path, storage_type: StorageType) -> Config {
        let mut config = Config::default();
        config.storage.storage_type = storage_type;
        config.storage.data_dir = dir.to_path_buf();
        config
    }

    #[test]
    fn test_sqlite_state_creation() {
        let dir = tempfile::tempdir().unwrap();
        let state = create_app_state(config_in(dir.path(), StorageType::Sqlite)).unwrap();
        assert_eq!(state.backend_name(), "sqlite");
        assert!(dir.path().join("inventory.db").exists());
    }

    #[test]
    fn test_document_state_creation_seeds_file() {
        let dir = tempfile::tempdir().unwrap();
        let state = create_app_state(config_in(dir.path(), StorageType::Document)).unwrap();
        assert_eq!(state.backend_name(), "document");

        match state {
            ConfiguredAppState::Document { app_state } => {
                let laptop = app_state.inventory.fetch(ProductId::new(1).unwrap()).unwrap();
                assert_eq!(laptop.name, "Laptop");
            }
            _ => panic!("expected document backend"),
        }
    }

    #[test]
    fn test_memory_state_creation() {
        let dir = tempfile::tempdir().unwrap();
        let state = create_app_state(config_in(dir.path(), StorageType::Memory)).unwrap();
        assert_eq!(state.backend_name(), "memory");
        assert_eq!(state.http_addr().port(), 8080);
    }
}
