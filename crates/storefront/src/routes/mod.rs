//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness
//! GET  /health/ready                - 200 once the catalog load settled, else 503
//! GET  /                            - Home page
//!
//! # Products
//! GET  /products?q=&category=       - Product grid fragment (HTMX)
//! GET  /products/{id}/quick-view    - Quick view fragment (HTMX)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                        - Cart drawer
//! POST /cart/add                    - Add to cart (returns badge, triggers cart-updated)
//! POST /cart/update                 - Set quantity (returns drawer)
//! POST /cart/remove                 - Remove line (returns drawer)
//! GET  /cart/count                  - Cart count badge
//!
//! # Checkout (HTMX fragments, mock OTP)
//! POST /checkout/start              - Open overlay
//! POST /checkout/otp                - Send mock OTP
//! POST /checkout/verify             - Verify OTP and pay
//! POST /checkout/close              - Close overlay
//!
//! # Rewards
//! GET  /rewards                     - Rewards badge
//! ```

pub mod cart;
pub mod checkout;
pub mod home;
pub mod products;

use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}/quick-view", get(products::quick_view))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/start", post(checkout::start))
        .route("/otp", post(checkout::send_otp))
        .route("/verify", post(checkout::verify))
        .route("/close", post(checkout::close))
}

/// Create all page and fragment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/rewards", get(home::rewards))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
}

/// Build the complete application router with tracing and request IDs.
///
/// Sentry layers are added by the binary on top of this.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable while the catalog fetch is in flight.
/// A failed fetch still counts as ready: the shop runs with an empty
/// catalog.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.shop().await.catalog().is_loading() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}
