//! HTTP API module for the inventory server
//!
//! ## Endpoints
//!
//! - `GET /product/{id}` - Fetch a product
//! - `POST /product` - Create a product
//! - `PUT /product/{id}` - Overwrite a product's stock
//! - `POST /product/{id}/stock` - Add units to a product's stock
//! - `GET /health` - Health check
//! - `GET /` - Service description

/// HTTP request handlers
pub mod api_handlers;

/// HTTP server implementation
pub mod api_server;

// Re-export commonly used items
pub use api_handlers::*;
pub use api_server::*;
