//! Search and category filtering over the catalog.
//!
//! Filtering is a pure function of the query, the selected category and the
//! product list. Results keep catalog order; there is no ranking.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Category selector value meaning "every category".
pub const ALL_CATEGORIES: &str = "all";

/// Selected category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    /// No category restriction.
    #[default]
    All,
    /// Only products whose category equals this label exactly.
    Only(String),
}

impl CategoryFilter {
    /// Read a selector value. Only [`ALL_CATEGORIES`] means every category;
    /// any other value, the empty label included, is matched exactly.
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    /// The selector value for this filter.
    #[must_use]
    pub fn as_param(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(category) => category,
        }
    }

    /// Whether `product` passes this filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => product.category == *category,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        Self::from_param(&value)
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.as_param().to_string()
    }
}

/// Free-text query and category selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Raw query text as typed.
    pub query: String,
    /// Selected category.
    pub category: CategoryFilter,
}

impl ProductFilter {
    /// Create a filter.
    #[must_use]
    pub fn new(query: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            query: query.into(),
            category,
        }
    }

    /// Apply the filter: category first, then text.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let by_category = filter_by_category(products, &self.category);
        filter_by_query(by_category, &self.query)
    }
}

/// Trim and lowercase a query.
#[must_use]
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Keep products in `category`.
pub fn filter_by_category<'a>(
    products: impl IntoIterator<Item = &'a Product>,
    category: &CategoryFilter,
) -> Vec<&'a Product> {
    products
        .into_iter()
        .filter(|p| category.matches(p))
        .collect()
}

/// Keep products whose title or description contains `query`, ignoring case.
///
/// A blank query keeps everything.
pub fn filter_by_query<'a>(
    products: impl IntoIterator<Item = &'a Product>,
    query: &str,
) -> Vec<&'a Product> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return products.into_iter().collect();
    }

    products
        .into_iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .collect()
}
