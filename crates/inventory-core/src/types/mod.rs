//! Type definitions shared by every layer of the service

/// Error taxonomy
pub mod error;

/// Product record and its key/quantity newtypes
pub mod product;

pub use error::{Error, Result, StorageError, ValidationError};
pub use product::{seed_products, NewProduct, Product, ProductId, Quantity, SEED_NEXT_ID};
