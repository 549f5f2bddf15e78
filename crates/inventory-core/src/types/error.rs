//! Error types and handling for the inventory service
//!
//! Every failure a request can hit is one of four classes: a validation
//! failure, a missing record, a key conflict, or a storage failure. The
//! server maps each class to exactly one HTTP status.

use thiserror::Error;

use super::product::ProductId;

/// Main result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the inventory service
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed or out-of-range client input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No record with this ID exists
    #[error("Product {0} not found")]
    NotFound(ProductId),

    /// A record with this ID already exists
    #[error("Product {0} already exists")]
    Conflict(ProductId),

    /// Backing medium failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Client input that failed the validation layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// ID is not an integer or is not positive
    #[error("Invalid product ID: {0}")]
    InvalidId(String),

    /// Quantity is not an integer or is negative
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    /// Name is present but not a string
    #[error("Invalid product name: {0}")]
    InvalidName(String),

    /// A required request field is absent
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The request body could not be interpreted at all
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// The request body exceeds the accepted size
    #[error("Request body too large: {0}")]
    BodyTooLarge(String),
}

/// Storage-specific errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// SQLite driver error
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// File I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Persisted data violates a record invariant
    #[error("Data corruption detected: {0}")]
    Corruption(String),

    /// Blocking storage task panicked or was cancelled
    #[error("Storage worker failed: {0}")]
    Worker(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a corruption error
    pub fn corruption(msg: impl Into<String>) -> Self {
        Self::Storage(StorageError::Corruption(msg.into()))
    }

    /// Check if this is a client error (4xx equivalent)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::NotFound(_) | Error::Conflict(_)
        )
    }

    /// Check if this is a server error (5xx equivalent)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Storage(_) | Error::Config(_))
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(StorageError::Sqlite(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(StorageError::Io(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(StorageError::Json(err))
    }
}
