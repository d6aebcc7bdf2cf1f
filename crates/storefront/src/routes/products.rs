//! Product grid and quick-view handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use credshop_core::ProductId;

use crate::catalog::{Catalog, Product};
use crate::error::{AppError, Result};
use crate::filter::{ALL_CATEGORIES, CategoryFilter, ProductFilter};
use crate::shop::Shop;
use crate::state::AppState;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub image: String,
    pub price: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            title: product.title.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            price: product.price.display_inr(),
        }
    }
}

/// Product grid display data.
#[derive(Clone)]
pub struct ProductGridView {
    pub loading: bool,
    pub products: Vec<ProductCardView>,
}

impl ProductGridView {
    /// Build the grid for the shop's active filter.
    #[must_use]
    pub fn from_shop(shop: &Shop) -> Self {
        Self {
            loading: shop.catalog().is_loading(),
            products: shop
                .visible_products()
                .into_iter()
                .map(ProductCardView::from)
                .collect(),
        }
    }
}

/// An entry of the category selector.
#[derive(Clone)]
pub struct CategoryOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Selector entries: "All Categories" followed by the catalog's categories.
#[must_use]
pub fn category_options(catalog: &Catalog, active: &CategoryFilter) -> Vec<CategoryOption> {
    let all = CategoryFilter::All;
    std::iter::once(CategoryOption {
        value: all.as_param().to_string(),
        label: "All Categories".to_string(),
        selected: *active == all,
    })
    .chain(catalog.categories().iter().map(|category| CategoryOption {
        value: category.clone(),
        label: category.clone(),
        selected: active.as_param() == category,
    }))
    .collect()
}

/// Quick-view overlay display data.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: String,
    pub price: String,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            title: product.title.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
            price: product.price.display_inr(),
        }
    }
}

/// Search and category query parameters.
#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default = "all_categories")]
    pub category: String,
}

fn all_categories() -> String {
    ALL_CATEGORIES.to_string()
}

/// Product grid fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub grid: ProductGridView,
}

/// Quick-view overlay fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/quick_view.html")]
pub struct QuickViewTemplate {
    pub product: ProductDetailView,
}

/// Apply the search box and category selector, returning the grid.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> impl IntoResponse {
    let mut shop = state.shop().await;
    shop.set_filter(ProductFilter::new(
        query.q,
        CategoryFilter::from_param(&query.category),
    ));

    ProductGridTemplate {
        grid: ProductGridView::from_shop(&shop),
    }
}

/// Product quick-view overlay (HTMX).
#[instrument(skip(state))]
pub async fn quick_view(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    let shop = state.shop().await;
    let product = shop
        .product(id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(QuickViewTemplate {
        product: ProductDetailView::from(product),
    })
}
