//! In-process record store
//!
//! Holds a seeded [`Catalog`] behind a lock. Nothing is persisted; each
//! instance is independent, so tests and embedders construct their own
//! rather than sharing global state.

use parking_lot::RwLock;

use super::{Catalog, RecordStore};
use crate::log_debug;
use crate::types::{NewProduct, Product, ProductId, Quantity, Result};

/// Record store kept entirely in memory
#[derive(Debug)]
pub struct MemoryRecordStore {
    catalog: RwLock<Catalog>,
}

impl MemoryRecordStore {
    /// Store pre-loaded with the three seed records
    pub fn new() -> Self {
        Self::with_catalog(Catalog::seeded())
    }

    /// Store holding the given catalog
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog: RwLock::new(catalog),
        }
    }

    /// Copy of the current catalog
    pub fn snapshot(&self) -> Catalog {
        self.catalog.read().clone()
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryRecordStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn fetch(&self, id: ProductId) -> Result<Product> {
        self.catalog.read().get(id)
    }

    fn create(&self, product: NewProduct) -> Result<Product> {
        let created = self.catalog.write().insert(product)?;
        log_debug!("memory store created product {}", created.id);
        Ok(created)
    }

    fn update_stock(&self, id: ProductId, quantity: Quantity) -> Result<()> {
        self.catalog.write().set_stock(id, quantity)
    }

    fn add_stock(&self, id: ProductId, amount: Quantity) -> Result<Quantity> {
        self.catalog.write().add_stock(id, amount)
    }
}
