//! # Inventory Server
//!
//! HTTP API for the inventory service: routing, request handling and the
//! mapping of inventory outcomes to status codes.

#![warn(missing_docs)]

/// HTTP API handlers and routing
pub mod api;

/// Application constants
pub mod constants;

// Re-export core functionality
pub use inventory_core::{Error, Inventory, Product, ProductId, Quantity, RecordStore, Result};
