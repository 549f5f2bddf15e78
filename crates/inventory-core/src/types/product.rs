//! Product record and the newtypes guarding its invariants
//!
//! `ProductId` is always positive and `Quantity` is never negative. Both can
//! only be built through [`ProductId::new`] / [`Quantity::new`], and serde goes
//! through the same checks, so a value read back from any backend carries the
//! same guarantees as one taken from a validated request.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValidationError;

/// Next ID of a freshly seeded store
pub const SEED_NEXT_ID: i64 = 4;

/// Unique key of a product, always > 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ProductId(i64);

impl ProductId {
    /// Build an ID, rejecting zero and negative values
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::InvalidId(format!(
                "{} is not a positive integer",
                value
            )));
        }
        Ok(Self(value))
    }

    /// Raw integer value
    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for ProductId {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductId> for i64 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stock level of a product, always >= 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Quantity(i64);

impl Quantity {
    /// Empty stock
    pub const ZERO: Quantity = Quantity(0);

    /// Build a quantity, rejecting negative values
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value < 0 {
            return Err(ValidationError::InvalidQuantity(format!(
                "{} is negative",
                value
            )));
        }
        Ok(Self(value))
    }

    /// Raw integer value
    pub fn get(self) -> i64 {
        self.0
    }

    /// Add stock, `None` on overflow
    pub fn checked_add(self, amount: Quantity) -> Option<Quantity> {
        self.0.checked_add(amount.0).map(Quantity)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for i64 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored product as returned by fetch
///
/// Serialized with the service's wire names `nombre` / `cantidad`; the English
/// names are accepted when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID
    pub id: ProductId,
    /// Display name
    #[serde(rename = "nombre", alias = "name")]
    pub name: String,
    /// Units in stock
    #[serde(rename = "cantidad", alias = "quantity")]
    pub quantity: Quantity,
}

/// Input of the create operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    /// Requested ID; `None` lets the store assign one
    pub id: Option<ProductId>,
    /// Display name
    pub name: String,
    /// Initial stock
    pub quantity: Quantity,
}

impl NewProduct {
    /// New product with a caller-chosen ID
    pub fn with_id(id: ProductId, name: impl Into<String>, quantity: Quantity) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            quantity,
        }
    }

    /// New product whose ID the store assigns
    pub fn auto(name: impl Into<String>, quantity: Quantity) -> Self {
        Self {
            id: None,
            name: name.into(),
            quantity,
        }
    }

    /// Finish the record once the store has settled on an ID
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            quantity: self.quantity,
        }
    }
}

/// Records every store starts with when no backing data exists
pub fn seed_products() -> Vec<Product> {
    [(1, "Laptop", 10), (2, "Monitor", 15), (3, "Teclado", 20)]
        .into_iter()
        .map(|(id, name, quantity)| Product {
            id: ProductId(id),
            name: name.to_string(),
            quantity: Quantity(quantity),
        })
        .collect()
}
