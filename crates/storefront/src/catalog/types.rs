//! Domain types for the product catalog.

use serde::{Deserialize, Serialize};

use credshop_core::{Price, ProductId};

/// A product in the catalog.
///
/// Parsed straight from the catalog API payload. Fields the storefront does
/// not use (such as `rating`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Upstream product ID.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Plain text description.
    #[serde(default)]
    pub description: String,
    /// Category label (free text, compared exactly).
    pub category: String,
    /// Unit price in the source currency.
    pub price: Price,
    /// Image URL.
    #[serde(default)]
    pub image: String,
}
