//! Application state shared by every request handler

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::config::Config;
use crate::inventory::Inventory;
use crate::storage::StorageImpl;

/// Central application state holding the configured inventory
pub struct AppState<S: StorageImpl> {
    /// Inventory service over the configured store
    pub inventory: Inventory<S>,

    /// Application configuration
    pub config: Config,

    /// When this state was built, for uptime reporting
    pub started_at: Instant,
}

// Manual Clone implementation for AppState that doesn't require S: Clone
impl<S: StorageImpl> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            inventory: self.inventory.clone(),
            config: self.config.clone(),
            started_at: self.started_at,
        }
    }
}

impl<S: StorageImpl> AppState<S> {
    /// Create a new AppState around an opened store
    pub fn new(store: Arc<S>, config: Config) -> Self {
        Self {
            inventory: Inventory::new(store),
            config,
            started_at: Instant::now(),
        }
    }

    /// Time since the state was created
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
