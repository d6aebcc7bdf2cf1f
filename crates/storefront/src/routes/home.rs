//! Home page and rewards badge.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::routes::checkout::CheckoutView;
use crate::routes::products::{CategoryOption, ProductGridView, category_options};
use crate::state::AppState;

/// Home page template.
///
/// Includes every fragment so the first render needs no extra requests.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub query: String,
    pub categories: Vec<CategoryOption>,
    pub grid: ProductGridView,
    pub count: usize,
    pub rewards: u64,
    pub checkout: CheckoutView,
}

/// Rewards badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/rewards.html")]
pub struct RewardsTemplate {
    pub rewards: u64,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let shop = state.shop().await;
    let filter = shop.filter();

    IndexTemplate {
        query: filter.query.clone(),
        categories: category_options(shop.catalog(), &filter.category),
        grid: ProductGridView::from_shop(&shop),
        count: shop.cart().len(),
        rewards: shop.rewards().balance().value(),
        checkout: CheckoutView::from_shop(&shop),
    }
}

/// Get the rewards badge (HTMX).
#[instrument(skip(state))]
pub async fn rewards(State(state): State<AppState>) -> impl IntoResponse {
    let shop = state.shop().await;
    RewardsTemplate {
        rewards: shop.rewards().balance().value(),
    }
}
