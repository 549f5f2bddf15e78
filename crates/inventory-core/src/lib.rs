//! # Inventory Core
//!
//! Core types and abstractions for the inventory service: product records,
//! input validation, the `RecordStore` capability and its backends.

#![warn(missing_docs)]

/// Application configuration, logging and state
pub mod core;

/// Type definitions for records and errors
pub mod types;

/// Validation of raw client input
pub mod validation;

/// Storage layer for product records
pub mod storage;

/// Inventory service wrapping a record store
pub mod inventory;

// Re-export commonly used items
pub use types::{Error, NewProduct, Product, ProductId, Quantity, Result, StorageError, ValidationError};
pub use storage::RecordStore;
pub use inventory::Inventory;

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
