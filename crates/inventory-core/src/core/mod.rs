//! Core application logic and configuration

/// Application configuration
pub mod config;

/// Logging macros and subscriber setup
pub mod logging;

/// Application state management
pub mod app_state;

/// Factory pattern for app creation
pub mod factory;

// Re-export commonly used items
pub use app_state::AppState;
pub use config::{load_config_or_default, Config, StorageType};
pub use factory::{create_app_state, ConfiguredAppState};
