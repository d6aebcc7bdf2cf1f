//! Shopping cart and its persisted store.
//!
//! # Invariants
//!
//! - At most one line per product ID
//! - Every line has a quantity of at least 1. Setting a quantity below 1
//!   clamps it to 1; only [`Cart::remove`] deletes a line.
//! - Lines keep insertion order
//!
//! [`CartStore`] writes the whole cart to durable storage after every
//! mutation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use credshop_core::{Price, ProductId};

use crate::catalog::Product;
use crate::storage::{self, KeyValueStore, keys};

/// A product and how many of it are in the cart.
///
/// Serialized with the product fields flattened next to `qty`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product, as it was when added.
    #[serde(flatten)]
    pub product: Product,
    /// Quantity, always at least 1.
    pub qty: u32,
}

impl CartLine {
    /// Unit price × quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.qty)
    }
}

/// An ordered list of cart lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `qty` of `product`.
    ///
    /// Increases the existing line's quantity, or appends a new line. A
    /// quantity of 0 counts as 1.
    pub fn add(&mut self, product: &Product, qty: u32) {
        let qty = qty.max(1);
        if let Some(line) = self.line_mut(product.id) {
            line.qty = line.qty.saturating_add(qty);
        } else {
            self.lines.push(CartLine {
                product: product.clone(),
                qty,
            });
        }
    }

    /// Set a line's quantity to `max(1, qty)`.
    ///
    /// Returns `false` if no line has this product ID.
    pub fn update_quantity(&mut self, id: ProductId, qty: i64) -> bool {
        let Some(line) = self.line_mut(id) else {
            return false;
        };
        line.qty = u32::try_from(qty.max(1)).unwrap_or(u32::MAX);
        true
    }

    /// Delete a line. Returns `false` if it was not in the cart.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product.id != id);
        self.lines.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of unit price × quantity, in the source currency.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for a product, if present.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == id)
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product.id == id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.qty)).sum()
    }
}

impl From<Vec<CartLine>> for Cart {
    /// Rebuild a cart from stored lines, re-establishing the invariants:
    /// duplicate IDs are merged into the first line and zero quantities
    /// become 1.
    fn from(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            cart.add(&line.product, line.qty);
        }
        cart
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

/// A [`Cart`] mirrored to durable storage.
pub struct CartStore {
    cart: Cart,
    storage: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Load the cart from storage.
    ///
    /// A missing, unreadable or corrupt snapshot yields an empty cart.
    #[must_use]
    pub fn restore(storage: Arc<dyn KeyValueStore>) -> Self {
        let cart = match storage::read_json::<Cart>(storage.as_ref(), keys::CART) {
            Ok(cart) => cart.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable cart snapshot");
                Cart::new()
            }
        };

        tracing::debug!(lines = cart.len(), "Cart restored");
        Self { cart, storage }
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// See [`Cart::add`].
    pub fn add(&mut self, product: &Product, qty: u32) {
        self.cart.add(product, qty);
        self.persist();
    }

    /// See [`Cart::update_quantity`].
    pub fn update_quantity(&mut self, id: ProductId, qty: i64) -> bool {
        let found = self.cart.update_quantity(id, qty);
        self.persist();
        found
    }

    /// See [`Cart::remove`].
    pub fn remove(&mut self, id: ProductId) -> bool {
        let found = self.cart.remove(id);
        self.persist();
        found
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    fn persist(&self) {
        storage::write_best_effort(
            keys::CART,
            storage::write_json(self.storage.as_ref(), keys::CART, &self.cart),
        );
    }
}
