//! The storefront router driven in-process with `oneshot`.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use tower::ServiceExt;

use credshop_integration_tests::{FailingCatalog, StaticCatalog, fixture_products, memory_store};
use credshop_storefront::middleware::REQUEST_ID_HEADER;
use credshop_storefront::routes;
use credshop_storefront::shop::Shop;
use credshop_storefront::state::AppState;

// =============================================================================
// Helpers
// =============================================================================

fn unloaded_state() -> AppState {
    AppState::new(Shop::restore(memory_store(), memory_store()))
}

async fn loaded_state() -> AppState {
    let state = unloaded_state();
    state
        .load_catalog(&StaticCatalog::new(fixture_products()))
        .await;
    state
}

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post(app: &Router, uri: &str, form: &str) -> Response {
    app.clone()
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn hx_trigger(response: &Response) -> Option<&str> {
    response
        .headers()
        .get("HX-Trigger")
        .and_then(|v| v.to_str().ok())
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = routes::router(unloaded_state());
    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_follows_catalog_load() {
    let state = unloaded_state();
    let app = routes::router(state.clone());
    assert_eq!(get(&app, "/health/ready").await.status(), StatusCode::SERVICE_UNAVAILABLE);

    state
        .start_catalog_load(StaticCatalog::new(fixture_products()))
        .await
        .unwrap();
    assert_eq!(get(&app, "/health/ready").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_failed_catalog_is_ready_and_empty() {
    let state = unloaded_state();
    state.load_catalog(&FailingCatalog).await;
    let app = routes::router(state);

    assert_eq!(get(&app, "/health/ready").await.status(), StatusCode::OK);
    let body = body_text(get(&app, "/products").await).await;
    assert!(body.contains("No products found"));
}

#[tokio::test]
async fn test_request_id_generated_and_echoed() {
    let app = routes::router(unloaded_state());

    let response = get(&app, "/health").await;
    let generated = response.headers().get(REQUEST_ID_HEADER).unwrap();
    assert_eq!(generated.to_str().unwrap().len(), 36);

    let response = app
        .clone()
        .oneshot(
            Request::get("/health")
                .header(REQUEST_ID_HEADER, "edge-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "edge-42");
}

// =============================================================================
// Pages and products
// =============================================================================

#[tokio::test]
async fn test_home_page_while_loading() {
    let app = routes::router(unloaded_state());
    let body = body_text(get(&app, "/").await).await;
    assert!(body.contains("CREDshop"));
    assert!(body.contains("Loading..."));
    assert!(body.contains("Rewards: 0 pts"));
}

#[tokio::test]
async fn test_home_page_lists_catalog() {
    let app = routes::router(loaded_state().await);
    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("All Categories"));
    assert!(body.contains("Fjallraven Backpack"));
    assert!(body.contains("electronics"));
    // 109.95 * 80 = 8796
    assert!(body.contains("₹8796"));
}

#[tokio::test]
async fn test_product_search_and_category() {
    let app = routes::router(loaded_state().await);

    let body = body_text(get(&app, "/products?q=GOLD").await).await;
    assert!(body.contains("Gold Chain Bracelet"));
    assert!(!body.contains("Backpack"));

    let body = body_text(get(&app, "/products?category=electronics&q=").await).await;
    assert!(body.contains("Portable SSD 1TB"));
    assert!(!body.contains("Gold Chain Bracelet"));

    let body = body_text(get(&app, "/products?q=nothing-matches").await).await;
    assert!(body.contains("No products found"));
}

#[tokio::test]
async fn test_quick_view() {
    let app = routes::router(loaded_state().await);

    let response = get(&app, "/products/3/quick-view").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Solid gold, dragon motif"));
    assert!(body.contains("Buy with CRED"));

    assert_eq!(
        get(&app, "/products/999/quick-view").await.status(),
        StatusCode::NOT_FOUND
    );
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_cart_add_update_remove() {
    let app = routes::router(loaded_state().await);

    let response = post(&app, "/cart/add", "product_id=1&quantity=2").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(hx_trigger(&response), Some("cart-updated"));
    assert!(body_text(response).await.contains(">1</span>"));

    // Same product again: still one line
    post(&app, "/cart/add", "product_id=1").await;
    let body = body_text(get(&app, "/cart").await).await;
    assert!(body.contains("Fjallraven Backpack x 3"));

    let body = body_text(post(&app, "/cart/update", "product_id=1&quantity=0").await).await;
    assert!(body.contains("Fjallraven Backpack x 1"));

    let body = body_text(post(&app, "/cart/update", "product_id=1&quantity=-4").await).await;
    assert!(body.contains("Fjallraven Backpack x 1"));

    let response = post(&app, "/cart/remove", "product_id=1").await;
    assert_eq!(hx_trigger(&response), Some("cart-updated"));
    assert!(body_text(response).await.contains("Cart is empty"));

    let body = body_text(get(&app, "/cart/count").await).await;
    assert!(body.contains(">0</span>"));
}

#[tokio::test]
async fn test_cart_update_saturates_oversized_quantity() {
    let app = routes::router(loaded_state().await);
    post(&app, "/cart/add", "product_id=2").await;

    let response = post(&app, "/cart/update", "product_id=2&quantity=99999999999").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Slim Fit T-Shirt x 4294967295"));

    assert_eq!(get(&app, "/").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cart_add_unknown_product() {
    let app = routes::router(loaded_state().await);
    assert_eq!(
        post(&app, "/cart/add", "product_id=999").await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_cart_badge_counts_distinct_lines() {
    let app = routes::router(loaded_state().await);
    post(&app, "/cart/add", "product_id=1&quantity=5").await;
    let response = post(&app, "/cart/add", "product_id=2&quantity=3").await;
    assert!(body_text(response).await.contains(">2</span>"));
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn test_checkout_on_empty_cart() {
    let app = routes::router(loaded_state().await);
    let body = body_text(post(&app, "/checkout/start", "").await).await;
    assert!(body.contains("Cart is empty"));
    assert!(!body.contains("CRED Quick Pay"));
}

#[tokio::test]
async fn test_checkout_full_flow() {
    let state = loaded_state().await;
    let app = routes::router(state.clone());

    // 64.00 + 22.30 = 86.30; 2% = 1.726 -> 2
    post(&app, "/cart/add", "product_id=4").await;
    post(&app, "/cart/add", "product_id=2").await;

    let body = body_text(post(&app, "/checkout/start", "").await).await;
    assert!(body.contains("CRED Quick Pay"));
    assert!(body.contains("Send OTP"));

    let body = body_text(post(&app, "/checkout/otp", "phone=12345").await).await;
    assert!(body.contains("Enter a valid 10-digit phone number"));
    assert!(body.contains("value=\"12345\""));

    let body = body_text(post(&app, "/checkout/otp", "phone=9876543210").await).await;
    assert!(body.contains("Mock OTP sent. Check the server log."));
    assert!(body.contains("Verify &amp; Pay"));

    let code = state
        .shop()
        .await
        .checkout()
        .pending_code()
        .unwrap()
        .to_string();

    let body = body_text(post(&app, "/checkout/verify", "otp=000000").await).await;
    assert!(body.contains("Invalid OTP"));

    let response = post(&app, "/checkout/verify", &format!("otp={code}")).await;
    let trigger = hx_trigger(&response).unwrap().to_string();
    assert!(trigger.contains("cart-updated"));
    assert!(trigger.contains("rewards-updated"));
    let body = body_text(response).await;
    assert!(body.contains("Payment successful! Rewards credited."));
    assert!(body.contains("You earned 2 pts"));
    assert!(body.contains("Verify &amp; Pay"));

    let body = body_text(get(&app, "/rewards").await).await;
    assert!(body.contains("Rewards: 2 pts"));
    let body = body_text(get(&app, "/cart").await).await;
    assert!(body.contains("Cart is empty"));

    let body = body_text(post(&app, "/checkout/verify", &format!("otp={code}")).await).await;
    assert!(body.contains("OTP not generated"));

    let body = body_text(post(&app, "/checkout/close", "").await).await;
    assert!(!body.contains("CRED Quick Pay"));
}
