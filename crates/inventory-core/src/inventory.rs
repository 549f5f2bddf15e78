//! Inventory service
//!
//! Thin layer between the endpoints and a [`RecordStore`]. Inputs arrive
//! already validated; on the stock-changing paths the service re-asserts the
//! ID/quantity contract right before the store call. A failure there means an
//! upstream bug rather than bad client input, so it is logged as an error,
//! but it still surfaces as a `ValidationError` instead of a panic.

use std::sync::Arc;

use crate::storage::StorageImpl;
use crate::types::{NewProduct, Product, ProductId, Quantity, Result, ValidationError};
use crate::{log_debug, log_error};

/// Product operations over a shared store
pub struct Inventory<S: StorageImpl> {
    store: Arc<S>,
}

// Only the Arc is cloned, so S need not be Clone
impl<S: StorageImpl> Clone for Inventory<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: StorageImpl> Inventory<S> {
    /// Wrap a store
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Underlying store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Backend name of the underlying store
    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Fetch a product
    pub fn fetch(&self, id: ProductId) -> Result<Product> {
        log_debug!("fetch product {} from {}", id, self.backend_name());
        self.store.fetch(id)
    }

    /// Create a product
    pub fn create(&self, product: NewProduct) -> Result<Product> {
        log_debug!("create product {:?} in {}", product.id, self.backend_name());
        self.store.create(product)
    }

    /// Set the stock of a product
    pub fn update_stock(&self, id: ProductId, quantity: Quantity) -> Result<()> {
        ensure_stock_contract("update_stock", id, quantity, false)?;
        self.store.update_stock(id, quantity)
    }

    /// Add units to the stock of a product, returning the new stock
    pub fn add_stock(&self, id: ProductId, amount: Quantity) -> Result<Quantity> {
        ensure_stock_contract("add_stock", id, amount, true)?;
        self.store.add_stock(id, amount)
    }
}

/// Re-check the store-boundary contract on raw values
fn ensure_stock_contract(
    operation: &str,
    id: ProductId,
    quantity: Quantity,
    require_positive: bool,
) -> Result<()> {
    let violation = if id.get() <= 0 {
        Some(ValidationError::InvalidId(format!("{} is not a positive integer", id)))
    } else if quantity.get() < 0 {
        Some(ValidationError::InvalidQuantity(format!("{} is negative", quantity)))
    } else if require_positive && quantity == Quantity::ZERO {
        Some(ValidationError::InvalidQuantity(
            "amount to add must be positive".to_string(),
        ))
    } else {
        None
    };

    match violation {
        Some(err) => {
            log_error!("contract violation in {}: {}", operation, err);
            Err(err.into())
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryRecordStore;
    use crate::types::Error;

    fn inventory() -> Inventory<MemoryRecordStore> {
        Inventory::new(Arc::new(MemoryRecordStore::new()))
    }

    #[test]
    fn test_update_then_fetch() {
        let inventory = inventory();
        let id = ProductId::new(2).unwrap();
        inventory.update_stock(id, Quantity::new(1).unwrap()).unwrap();

        let monitor = inventory.fetch(id).unwrap();
        assert_eq!(monitor.quantity.get(), 1);
        assert_eq!(monitor.name, "Monitor");
    }

    #[test]
    fn test_zero_amount_rejected_before_store() {
        let inventory = inventory();
        let err = inventory
            .add_stock(ProductId::new(1).unwrap(), Quantity::ZERO)
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::InvalidQuantity(_))));
        assert_eq!(inventory.fetch(ProductId::new(1).unwrap()).unwrap().quantity.get(), 10);
    }

    #[test]
    fn test_clones_share_store() {
        let a = inventory();
        let b = a.clone();
        a.add_stock(ProductId::new(3).unwrap(), Quantity::new(5).unwrap()).unwrap();
        assert_eq!(b.fetch(ProductId::new(3).unwrap()).unwrap().quantity.get(), 25);
        assert_eq!(b.backend_name(), "memory");
    }
}
