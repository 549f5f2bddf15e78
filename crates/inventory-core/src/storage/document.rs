//! JSON document record store
//!
//! The whole catalog lives in one JSON file that is read on every operation
//! and rewritten in full on every mutation. A missing file is created with
//! the seed records when the store is opened.
//!
//! Mutations within this process are serialized by `write_lock`. Other
//! processes writing the same file are not coordinated with: concurrent
//! read-modify-write cycles across processes are last-writer-wins.

use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};

use super::{Catalog, RecordStore};
use crate::types::{NewProduct, Product, ProductId, Quantity, Result};
use crate::{log_debug, log_info};

/// Record store backed by a single JSON document
#[derive(Debug)]
pub struct DocumentRecordStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl DocumentRecordStore {
    /// Open the document at `path`, seeding it when absent
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the file or its directory cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        };
        store.ensure_document()?;
        Ok(store)
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_document(&self) -> Result<()> {
        let _guard = self.write_lock.lock();
        if !self.path.exists() {
            log_info!("Seeding product document at {:?}", self.path);
            self.save(&Catalog::seeded())?;
        }
        Ok(())
    }

    /// Read the full catalog from disk
    pub fn load(&self) -> Result<Catalog> {
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, catalog: &Catalog) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(catalog)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Load, apply `change`, and write back only if it succeeded
    fn modify<T>(&self, change: impl FnOnce(&mut Catalog) -> Result<T>) -> Result<T> {
        let _guard = self.write_lock.lock();
        let mut catalog = self.load()?;
        let outcome = change(&mut catalog)?;
        self.save(&catalog)?;
        Ok(outcome)
    }
}

impl RecordStore for DocumentRecordStore {
    fn backend_name(&self) -> &'static str {
        "document"
    }

    fn fetch(&self, id: ProductId) -> Result<Product> {
        let _guard = self.write_lock.lock();
        self.load()?.get(id)
    }

    fn create(&self, product: NewProduct) -> Result<Product> {
        let created = self.modify(|catalog| catalog.insert(product))?;
        log_debug!("document store created product {}", created.id);
        Ok(created)
    }

    fn update_stock(&self, id: ProductId, quantity: Quantity) -> Result<()> {
        self.modify(|catalog| catalog.set_stock(id, quantity))
    }

    fn add_stock(&self, id: ProductId, amount: Quantity) -> Result<Quantity> {
        self.modify(|catalog| catalog.add_stock(id, amount))
    }
}
