//! Integration tests for CREDshop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p credshop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_properties` - Randomized cart operation sequences
//! - `filter_properties` - Search and category filter laws
//! - `checkout_flow` - Mock OTP checkout and restart persistence
//! - `http_routes` - The axum router driven with `oneshot`
//!
//! Nothing here touches the network: the catalog comes from
//! [`StaticCatalog`].

use std::sync::Arc;

use credshop_core::{Price, ProductId};
use credshop_storefront::catalog::{Catalog, CatalogError, CatalogSource, Product};
use credshop_storefront::shop::Shop;
use credshop_storefront::storage::{KeyValueStore, MemoryStore};

/// A catalog source serving a fixed product list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    /// Serve `products`.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

impl CatalogSource for StaticCatalog {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.clone())
    }
}

/// A catalog source that always fails, like an unreachable API.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingCatalog;

impl CatalogSource for FailingCatalog {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        Err(CatalogError::Status {
            status: 503,
            body: "service unavailable".to_string(),
        })
    }
}

/// Build a product.
#[must_use]
pub fn product(id: i64, title: &str, description: &str, category: &str, cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        price: Price::from_cents(cents),
        image: format!("https://img.example/{id}.jpg"),
    }
}

/// A small catalog shaped like the public demo API.
#[must_use]
pub fn fixture_products() -> Vec<Product> {
    vec![
        product(1, "Fjallraven Backpack", "Fits 15 inch laptops", "men's clothing", 10995),
        product(2, "Slim Fit T-Shirt", "Casual premium cotton tee", "men's clothing", 2230),
        product(3, "Gold Chain Bracelet", "Solid gold, dragon motif", "jewelery", 69500),
        product(4, "Portable SSD 1TB", "USB 3.0 external storage", "electronics", 6400),
        product(5, "Rain Jacket", "Lightweight, packs into a pocket", "women's clothing", 3999),
    ]
}

/// A shop with in-memory stores and the fixture catalog loaded.
#[must_use]
pub fn memory_shop() -> Shop {
    let mut shop = Shop::restore(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()));
    shop.replace_catalog(Catalog::from_products(fixture_products()));
    shop
}

/// A shared in-memory store, typed for [`Shop::restore`].
#[must_use]
pub fn memory_store() -> Arc<dyn KeyValueStore> {
    Arc::new(MemoryStore::new())
}
