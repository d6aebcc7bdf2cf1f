//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Every mutation answers with `HX-Trigger: cart-updated` so the badge and
//! drawer refresh themselves.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse},
};
use serde::Deserialize;
use tracing::instrument;

use credshop_core::ProductId;

use crate::cart::{Cart, CartLine};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// HTMX event fired after any cart change.
pub const CART_UPDATED: &str = "cart-updated";

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: i64,
    pub title: String,
    pub image: String,
    pub quantity: u32,
    /// Quantity for the "-" button. May be 0; the cart clamps it to 1.
    pub decrement_to: i64,
    pub increment_to: i64,
    pub line_price: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        let quantity = i64::from(line.qty);
        Self {
            id: line.product.id.as_i64(),
            title: line.product.title.clone(),
            image: line.product.image.clone(),
            quantity: line.qty,
            decrement_to: quantity - 1,
            increment_to: quantity + 1,
            line_price: line.line_total().display_inr(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    /// Distinct lines, as shown on the header badge.
    pub line_count: usize,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            total: cart.total().display_inr(),
            line_count: cart.len(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

/// Cart drawer fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_drawer.html")]
pub struct CartDrawerTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: usize,
}

/// Display the cart drawer.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let shop = state.shop().await;
    CartDrawerTemplate {
        cart: CartView::from(shop.cart()),
    }
}

/// Add a catalog product to the cart (HTMX).
///
/// Returns the cart count badge.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<AddToCartForm>,
) -> Result<impl IntoResponse> {
    let mut shop = state.shop().await;
    let product = shop
        .product(form.product_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    shop.add_to_cart(&product, form.quantity.unwrap_or(1));
    let product_id = product.id.to_string();
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_id.as_str())]));

    Ok((
        AppendHeaders([("HX-Trigger", CART_UPDATED)]),
        CartCountTemplate {
            count: shop.cart().len(),
        },
    ))
}

/// Update cart item quantity (HTMX).
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<UpdateCartForm>,
) -> impl IntoResponse {
    let mut shop = state.shop().await;
    if !shop.update_quantity(form.product_id, form.quantity) {
        tracing::debug!(product_id = %form.product_id, "Update for a product not in the cart");
    }

    (
        AppendHeaders([("HX-Trigger", CART_UPDATED)]),
        CartDrawerTemplate {
            cart: CartView::from(shop.cart()),
        },
    )
}

/// Remove item from cart (HTMX).
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> impl IntoResponse {
    let mut shop = state.shop().await;
    if shop.remove_from_cart(form.product_id) {
        let product_id = form.product_id.to_string();
        add_breadcrumb("cart", "Removed from cart", Some(&[("product_id", product_id.as_str())]));
    }

    (
        AppendHeaders([("HX-Trigger", CART_UPDATED)]),
        CartDrawerTemplate {
            cart: CartView::from(shop.cart()),
        },
    )
}

/// Get cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    let shop = state.shop().await;
    CartCountTemplate {
        count: shop.cart().len(),
    }
}
