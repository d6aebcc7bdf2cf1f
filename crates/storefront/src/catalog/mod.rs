//! Product catalog loading.
//!
//! # Architecture
//!
//! - The catalog is fetched once, on startup, from a [`CatalogSource`]
//! - [`HttpCatalogSource`] reads the public catalog API with `reqwest`
//! - The loaded list replaces the empty one in a single assignment, so
//!   readers see either `Loading` or the complete catalog
//! - A failed fetch is logged and leaves the catalog empty. There is no retry.
//!
//! # Example
//!
//! ```rust,ignore
//! use credshop_storefront::catalog::{Catalog, HttpCatalogSource};
//!
//! let source = HttpCatalogSource::new(&config.catalog)?;
//! let catalog = Catalog::load(&source).await;
//! for category in catalog.categories() {
//!     println!("{category}");
//! }
//! ```

mod client;
pub mod types;

use std::future::Future;

use thiserror::Error;

use credshop_core::ProductId;

pub use client::HttpCatalogSource;
pub use types::Product;

/// Errors that can occur when fetching the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog API answered with a non-success status.
    #[error("Catalog API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Somewhere the full product list can be read from.
pub trait CatalogSource: Send + Sync {
    /// Fetch every product.
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;
}

/// Progress of the one-shot catalog load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// The fetch has not completed yet.
    #[default]
    Loading,
    /// Products are available.
    Ready,
    /// The fetch failed; the catalog stays empty.
    Failed,
}

/// The in-memory product catalog and the categories derived from it.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<String>,
    state: LoadState,
}

impl Catalog {
    /// An empty catalog whose fetch is still in flight.
    #[must_use]
    pub fn loading() -> Self {
        Self::default()
    }

    /// A ready catalog built from a product list.
    ///
    /// Categories are the distinct `category` labels in first-seen order.
    #[must_use]
    pub fn from_products(products: Vec<Product>) -> Self {
        let mut categories: Vec<String> = Vec::new();
        for product in &products {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }

        Self {
            products,
            categories,
            state: LoadState::Ready,
        }
    }

    /// Build the catalog from the outcome of a fetch.
    ///
    /// A failure is logged and produces an empty catalog in the `Failed`
    /// state.
    #[must_use]
    pub fn from_fetch(result: Result<Vec<Product>, CatalogError>) -> Self {
        match result {
            Ok(products) => {
                tracing::info!(
                    products = products.len(),
                    "Catalog loaded"
                );
                Self::from_products(products)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch products");
                Self {
                    products: Vec::new(),
                    categories: Vec::new(),
                    state: LoadState::Failed,
                }
            }
        }
    }

    /// Fetch from `source` and build the catalog.
    pub async fn load<S: CatalogSource>(source: &S) -> Self {
        Self::from_fetch(source.fetch_products().await)
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Distinct category labels, in first-seen order.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Load progress.
    #[must_use]
    pub const fn state(&self) -> LoadState {
        self.state
    }

    /// Whether the fetch is still in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credshop_core::Price;

    fn product(id: i64, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            description: String::new(),
            category: category.to_string(),
            price: Price::from_cents(100),
            image: String::new(),
        }
    }

    #[test]
    fn test_categories_first_seen_order() {
        let catalog = Catalog::from_products(vec![
            product(1, "jewelery"),
            product(2, "electronics"),
            product(3, "jewelery"),
            product(4, "men's clothing"),
        ]);
        assert_eq!(
            catalog.categories(),
            ["jewelery", "electronics", "men's clothing"]
        );
        assert_eq!(catalog.state(), LoadState::Ready);
    }

    #[test]
    fn test_failed_fetch_leaves_catalog_empty() {
        let err = CatalogError::Status {
            status: 503,
            body: "unavailable".to_string(),
        };
        let catalog = Catalog::from_fetch(Err(err));
        assert!(catalog.products().is_empty());
        assert!(catalog.categories().is_empty());
        assert_eq!(catalog.state(), LoadState::Failed);
        assert!(!catalog.is_loading());
    }

    #[test]
    fn test_loading_state() {
        let catalog = Catalog::loading();
        assert!(catalog.is_loading());
        assert!(catalog.products().is_empty());
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::from_products(vec![product(1, "a"), product(2, "b")]);
        assert_eq!(catalog.get(ProductId::new(2)).map(|p| p.category.as_str()), Some("b"));
        assert!(catalog.get(ProductId::new(9)).is_none());
    }

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Catalog API returned 500: boom");
    }
}
