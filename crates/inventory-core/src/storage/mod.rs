//! Storage layer for product records
//!
//! This module provides the storage abstraction that lets the service run on
//! different backends while keeping one externally observable contract:
//!
//! - `fetch` of an absent ID is `Error::NotFound`
//! - `create` of an existing ID is `Error::Conflict` and changes nothing
//! - `update_stock` / `add_stock` of an absent ID is `Error::NotFound`
//! - any failure of the backing medium is `Error::Storage`
//!
//! Callers hand in already validated `ProductId` / `Quantity` values.

use crate::types::{NewProduct, Product, ProductId, Quantity, Result};

/// Trait for product record storage implementations
pub trait RecordStore: Send + Sync {
    /// Short backend name for logs and health output
    fn backend_name(&self) -> &'static str;

    /// Get a product by ID
    fn fetch(&self, id: ProductId) -> Result<Product>;

    /// Insert a new product
    ///
    /// # Returns
    ///
    /// * `Ok(Product)` - The stored record, with its assigned ID
    /// * `Err(Error::Conflict)` - A record with the requested ID exists
    fn create(&self, product: NewProduct) -> Result<Product>;

    /// Overwrite the quantity of an existing product, leaving its name alone
    fn update_stock(&self, id: ProductId, quantity: Quantity) -> Result<()>;

    /// Add `amount` units to an existing product and return the new quantity
    ///
    /// An addition that would overflow the quantity range fails with
    /// `ValidationError::InvalidQuantity` and leaves the record unchanged.
    fn add_stock(&self, id: ProductId, amount: Quantity) -> Result<Quantity>;
}

/// In-memory catalog model shared by the document and memory backends
pub mod catalog;

/// SQLite table backend
pub mod sqlite;

/// JSON document file backend
pub mod document;

/// In-process backend
pub mod memory;

/// Re-export main storage types
pub use catalog::{Catalog, StockEntry};
pub use document::DocumentRecordStore;
pub use memory::MemoryRecordStore;
pub use sqlite::SqliteRecordStore;

/// Helper trait that combines all requirements for storage implementations
/// This cleans up generic bounds throughout the codebase
pub trait StorageImpl: RecordStore + Send + Sync + 'static {}

/// Blanket implementation for any type that meets the requirements
impl<T> StorageImpl for T where T: RecordStore + Send + Sync + 'static {}

/// Contract tests every backend must pass
#[cfg(test)]
pub(crate) mod contract {
    use super::RecordStore;
    use crate::types::{Error, NewProduct, ProductId, Quantity, ValidationError};

    fn id(raw: i64) -> ProductId {
        ProductId::new(raw).unwrap()
    }

    fn qty(raw: i64) -> Quantity {
        Quantity::new(raw).unwrap()
    }

    pub fn fetch_missing_is_not_found(store: &dyn RecordStore) {
        assert!(matches!(store.fetch(id(999)), Err(Error::NotFound(missing)) if missing == id(999)));
    }

    pub fn create_then_fetch(store: &dyn RecordStore) {
        let created = store.create(NewProduct::with_id(id(50), "Mouse", qty(3))).unwrap();
        assert_eq!(created.id, id(50));

        let fetched = store.fetch(id(50)).unwrap();
        assert_eq!(fetched.name, "Mouse");
        assert_eq!(fetched.quantity, qty(3));
    }

    pub fn duplicate_create_conflicts(store: &dyn RecordStore) {
        store.create(NewProduct::with_id(id(60), "Cable", qty(8))).unwrap();

        let err = store
            .create(NewProduct::with_id(id(60), "Other", qty(1)))
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(existing) if existing == id(60)));

        let unchanged = store.fetch(id(60)).unwrap();
        assert_eq!(unchanged.name, "Cable");
        assert_eq!(unchanged.quantity, qty(8));
    }

    pub fn update_overwrites_quantity_only(store: &dyn RecordStore) {
        store.create(NewProduct::with_id(id(70), "Hub", qty(4))).unwrap();
        store.update_stock(id(70), qty(0)).unwrap();

        let fetched = store.fetch(id(70)).unwrap();
        assert_eq!(fetched.quantity, Quantity::ZERO);
        assert_eq!(fetched.name, "Hub");
    }

    pub fn update_missing_is_not_found(store: &dyn RecordStore) {
        assert!(matches!(store.update_stock(id(404), qty(1)), Err(Error::NotFound(_))));
        assert!(matches!(store.fetch(id(404)), Err(Error::NotFound(_))));
    }

    pub fn add_stock_accumulates(store: &dyn RecordStore) {
        store.create(NewProduct::with_id(id(80), "Dock", qty(2))).unwrap();
        assert_eq!(store.add_stock(id(80), qty(5)).unwrap(), qty(7));
        assert_eq!(store.fetch(id(80)).unwrap().quantity, qty(7));

        assert!(matches!(store.add_stock(id(81), qty(1)), Err(Error::NotFound(_))));
    }

    pub fn add_stock_overflow_is_rejected(store: &dyn RecordStore) {
        store.create(NewProduct::with_id(id(90), "Bulk", qty(i64::MAX - 1))).unwrap();
        let err = store.add_stock(id(90), qty(2)).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::InvalidQuantity(_))));
        assert_eq!(store.fetch(id(90)).unwrap().quantity, qty(i64::MAX - 1));
    }

    pub fn create_with_max_id(store: &dyn RecordStore) {
        let created = store.create(NewProduct::with_id(id(i64::MAX), "Max", qty(1))).unwrap();
        assert_eq!(created.id, id(i64::MAX));
        assert_eq!(store.fetch(id(i64::MAX)).unwrap().name, "Max");
        store.update_stock(id(i64::MAX), qty(2)).unwrap();
        assert_eq!(store.fetch(id(i64::MAX)).unwrap().quantity, qty(2));
    }

    pub fn auto_assigned_ids_are_unique(store: &dyn RecordStore) {
        let first = store.create(NewProduct::auto("A", qty(1))).unwrap();
        let second = store.create(NewProduct::auto("B", qty(1))).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(store.fetch(second.id).unwrap().name, "B");
    }

    /// Run every contract check against stores built by `make`
    pub fn run_all(make: impl Fn() -> Box<dyn RecordStore>) {
        fetch_missing_is_not_found(make().as_ref());
        create_then_fetch(make().as_ref());
        duplicate_create_conflicts(make().as_ref());
        update_overwrites_quantity_only(make().as_ref());
        update_missing_is_not_found(make().as_ref());
        add_stock_accumulates(make().as_ref());
        add_stock_overflow_is_rejected(make().as_ref());
        auto_assigned_ids_are_unique(make().as_ref());
        create_with_max_id(make().as_ref());
    }
}
