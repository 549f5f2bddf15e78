//! Catalog model for whole-document backends
//!
//! The document and memory backends both hold the full product map plus an
//! auto-increment counter and mutate it as one value. The on-disk shape is
//!
//! ```json
//! {"products": {"1": {"name": "Laptop", "stock": 10}}, "next_id": 2}
//! ```
//!
//! Files written with the keys `productos` / `siguiente_id` / `nombre` are
//! read as well.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{
    seed_products, Error, NewProduct, Product, ProductId, Quantity, Result, ValidationError,
    SEED_NEXT_ID,
};

/// Stored fields of one product; the ID is the map key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    /// Display name
    #[serde(alias = "nombre")]
    pub name: String,
    /// Units in stock
    pub stock: Quantity,
}

/// Full product map plus the next ID to hand out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Products keyed by ID
    #[serde(alias = "productos")]
    pub products: BTreeMap<ProductId, StockEntry>,
    /// Next self-assigned ID
    #[serde(alias = "siguiente_id")]
    pub next_id: i64,
}

impl Catalog {
    /// Catalog holding the three seed records
    pub fn seeded() -> Self {
        let products = seed_products()
            .into_iter()
            .map(|p| {
                (
                    p.id,
                    StockEntry {
                        name: p.name,
                        stock: p.quantity,
                    },
                )
            })
            .collect();

        Self {
            products,
            next_id: SEED_NEXT_ID,
        }
    }

    /// Look up a product
    pub fn get(&self, id: ProductId) -> Result<Product> {
        self.products
            .get(&id)
            .map(|entry| Product {
                id,
                name: entry.name.clone(),
                quantity: entry.stock,
            })
            .ok_or(Error::NotFound(id))
    }

    /// Insert a product, assigning `next_id` when no ID was requested
    ///
    /// A requested ID that is taken is a conflict. A requested ID at or past
    /// `next_id` moves the counter beyond it so later self-assigned IDs never
    /// collide with it.
    pub fn insert(&mut self, product: NewProduct) -> Result<Product> {
        let id = match product.id {
            Some(id) => {
                if self.products.contains_key(&id) {
                    return Err(Error::Conflict(id));
                }
                id
            }
            None => self.allocate_id()?,
        };

        if id.get() >= self.next_id {
            self.next_id = id.get().saturating_add(1);
        }

        let product = product.into_product(id);
        self.products.insert(
            id,
            StockEntry {
                name: product.name.clone(),
                stock: product.quantity,
            },
        );
        Ok(product)
    }

    /// Overwrite the stock of an existing product
    pub fn set_stock(&mut self, id: ProductId, quantity: Quantity) -> Result<()> {
        let entry = self.products.get_mut(&id).ok_or(Error::NotFound(id))?;
        entry.stock = quantity;
        Ok(())
    }

    /// Add to the stock of an existing product
    pub fn add_stock(&mut self, id: ProductId, amount: Quantity) -> Result<Quantity> {
        let entry = self.products.get_mut(&id).ok_or(Error::NotFound(id))?;
        let stock = entry.stock.checked_add(amount).ok_or_else(|| {
            ValidationError::InvalidQuantity(format!(
                "adding {} to stock {} overflows",
                amount, entry.stock
            ))
        })?;
        entry.stock = stock;
        Ok(stock)
    }

    fn allocate_id(&self) -> Result<ProductId> {
        let mut candidate = self.next_id.max(1);
        while self.products.contains_key(&ProductId::new(candidate)?) {
            candidate = candidate
                .checked_add(1)
                .ok_or_else(|| Error::corruption("product ID space exhausted"))?;
        }
        Ok(ProductId::new(candidate)?)
    }
}
