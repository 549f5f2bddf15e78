//! `SQLite` record store.
//!
//! Products live in a single table:
//!
//! ```sql
//! CREATE TABLE products (id INTEGER PRIMARY KEY, name TEXT, quantity INTEGER)
//! ```
//!
//! Every operation opens its own connection and drops it before returning, on
//! success and error paths alike. Each operation is a single statement, so
//! atomicity comes from `SQLite` itself.

use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::RecordStore;
use crate::types::{Error, NewProduct, Product, ProductId, Quantity, Result, ValidationError};
use crate::{log_debug, log_info};

/// How long a statement waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Record store backed by an `SQLite` database file
#[derive(Debug, Clone)]
pub struct SqliteRecordStore {
    db_path: PathBuf,
}

impl SqliteRecordStore {
    /// Open the database at `db_path`, creating the table if absent.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the database cannot be opened or initialized.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            db_path: db_path.into(),
        };
        store.initialize()?;
        Ok(store)
    }

    /// Returns the database path.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    fn initialize(&self) -> Result<()> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = self.connect()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY,
                name TEXT,
                quantity INTEGER
            )",
            [],
        )?;
        log_info!("SQLite product table ready at {:?}", self.db_path);
        Ok(())
    }
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _) if failure.code == ErrorCode::ConstraintViolation
    )
}

fn build_product(id: i64, name: String, quantity: i64) -> Result<Product> {
    let id = ProductId::new(id)
        .map_err(|_| Error::corruption(format!("stored product has invalid id {}", id)))?;
    let quantity = Quantity::new(quantity).map_err(|_| {
        Error::corruption(format!("product {} has negative quantity {}", id, quantity))
    })?;
    Ok(Product { id, name, quantity })
}

impl RecordStore for SqliteRecordStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    fn fetch(&self, id: ProductId) -> Result<Product> {
        let conn = self.connect()?;
        let row = conn
            .query_row(
                "SELECT id, name, quantity FROM products WHERE id = ?1",
                params![id.get()],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((id, name, quantity)) => build_product(id, name, quantity),
            None => Err(Error::NotFound(id)),
        }
    }

    fn create(&self, product: NewProduct) -> Result<Product> {
        let conn = self.connect()?;

        let id = match product.id {
            Some(id) => {
                conn.execute(
                    "INSERT INTO products (id, name, quantity) VALUES (?1, ?2, ?3)",
                    params![id.get(), product.name, product.quantity.get()],
                )
                .map_err(|e| {
                    if is_constraint_violation(&e) {
                        Error::Conflict(id)
                    } else {
                        Error::from(e)
                    }
                })?;
                id
            }
            None => {
                conn.execute(
                    "INSERT INTO products (name, quantity) VALUES (?1, ?2)",
                    params![product.name, product.quantity.get()],
                )?;
                ProductId::new(conn.last_insert_rowid())?
            }
        };

        log_debug!("sqlite store created product {}", id);
        Ok(product.into_product(id))
    }

    fn update_stock(&self, id: ProductId, quantity: Quantity) -> Result<()> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE products SET quantity = ?1 WHERE id = ?2",
            params![quantity.get(), id.get()],
        )?;

        if changed == 0 {
            return Err(Error::NotFound(id));
        }
        Ok(())
    }

    fn add_stock(&self, id: ProductId, amount: Quantity) -> Result<Quantity> {
        let conn = self.connect()?;
        let headroom = i64::MAX - amount.get();
        let updated = conn
            .query_row(
                "UPDATE products SET quantity = quantity + ?1
                 WHERE id = ?2 AND quantity <= ?3
                 RETURNING quantity",
                params![amount.get(), id.get(), headroom],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;

        if let Some(quantity) = updated {
            return Quantity::new(quantity).map_err(|_| {
                Error::corruption(format!("product {} has negative quantity {}", id, quantity))
            });
        }

        // Nothing matched: either the product is absent or the sum overflows
        let current = self.fetch(id)?;
        Err(ValidationError::InvalidQuantity(format!(
            "adding {} to stock {} overflows",
            amount, current.quantity
        ))
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::contract;
    use std::cell::Cell;

    #[test]
    fn test_sqlite_store_contract() {
        let dir = tempfile::tempdir().unwrap();
        let counter = Cell::new(0);
        contract::run_all(|| {
            counter.set(counter.get() + 1);
            let path = dir.path().join(format!("inventory-{}.db", counter.get()));
            Box::new(SqliteRecordStore::open(path).unwrap())
        });
    }

    #[test]
    fn test_table_created_once_and_data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("inventory.db");

        let store = SqliteRecordStore::open(&path).unwrap();
        store
            .create(NewProduct::with_id(
                ProductId::new(5).unwrap(),
                "Mouse",
                Quantity::new(3).unwrap(),
            ))
            .unwrap();

        let reopened = SqliteRecordStore::open(&path).unwrap();
        let mouse = reopened.fetch(ProductId::new(5).unwrap()).unwrap();
        assert_eq!(mouse.name, "Mouse");
        assert_eq!(mouse.quantity.get(), 3);
    }

    #[test]
    fn test_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteRecordStore::open(dir.path().join("inventory.db")).unwrap();
        assert!(matches!(store.fetch(ProductId::new(1).unwrap()), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_negative_stored_quantity_is_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.db");
        let store = SqliteRecordStore::open(&path).unwrap();

        let conn = Connection::open(&path).unwrap();
        conn.execute(
            "INSERT INTO products (id, name, quantity) VALUES (1, 'Broken', -5)",
            [],
        )
        .unwrap();

        let err = store.fetch(ProductId::new(1).unwrap()).unwrap_err();
        assert!(err.is_server_error());
        assert!(err.to_string().contains("negative quantity"));
    }

    #[test]
    fn test_missing_table_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.db");
        let store = SqliteRecordStore::open(&path).unwrap();

        let conn = Connection::open(&path).unwrap();
        conn.execute("DROP TABLE products", []).unwrap();

        let err = store.update_stock(ProductId::new(1).unwrap(), Quantity::ZERO).unwrap_err();
        assert!(err.is_server_error());
        assert!(err.to_string().contains("no such table"));
    }
}
