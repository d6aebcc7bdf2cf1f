//! The storefront controller.
//!
//! [`Shop`] owns every piece of application state (catalog, current
//! filter, cart, rewards and checkout) and is the only thing that mutates
//! it. Route handlers and the CLI call into it; nothing else touches the
//! stores directly.

use std::sync::Arc;

use credshop_core::ProductId;

use crate::cart::{Cart, CartStore};
use crate::catalog::{Catalog, Product};
use crate::checkout::{Checkout, CheckoutError, CheckoutSession, PaymentReceipt};
use crate::filter::{CategoryFilter, ProductFilter};
use crate::rewards::RewardsLedger;
use crate::storage::KeyValueStore;

/// Application state for a single shopper.
#[derive(Debug)]
pub struct Shop {
    catalog: Catalog,
    filter: ProductFilter,
    cart: CartStore,
    rewards: RewardsLedger,
    checkout: Checkout,
}

impl Shop {
    /// Restore cart and rewards from `durable` and keep the pending OTP in
    /// `session`. The catalog starts out loading.
    #[must_use]
    pub fn restore(durable: Arc<dyn KeyValueStore>, session: Arc<dyn KeyValueStore>) -> Self {
        Self {
            catalog: Catalog::loading(),
            filter: ProductFilter::default(),
            cart: CartStore::restore(durable.clone()),
            rewards: RewardsLedger::restore(durable),
            checkout: Checkout::new(session),
        }
    }

    // =========================================================================
    // Catalog and filtering
    // =========================================================================

    /// The current catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Swap in a freshly loaded catalog.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
    }

    /// The active filter.
    #[must_use]
    pub const fn filter(&self) -> &ProductFilter {
        &self.filter
    }

    /// Replace the whole filter.
    pub fn set_filter(&mut self, filter: ProductFilter) {
        self.filter = filter;
    }

    /// Change the query text, keeping the category.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    /// Change the category, keeping the query.
    pub fn set_category(&mut self, category: CategoryFilter) {
        self.filter.category = category;
    }

    /// Products passing the active filter, in catalog order.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        self.filter.apply(self.catalog.products())
    }

    /// Look up a catalog product.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.catalog.get(id)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        self.cart.cart()
    }

    /// Add `qty` of a product to the cart.
    pub fn add_to_cart(&mut self, product: &Product, qty: u32) {
        self.cart.add(product, qty);
        tracing::debug!(product_id = %product.id, qty, "Added to cart");
    }

    /// Set a line's quantity. Returns `false` if the line is absent.
    pub fn update_quantity(&mut self, id: ProductId, qty: i64) -> bool {
        self.cart.update_quantity(id, qty)
    }

    /// Remove a line. Returns `false` if the line is absent.
    pub fn remove_from_cart(&mut self, id: ProductId) -> bool {
        self.cart.remove(id)
    }

    // =========================================================================
    // Rewards and checkout
    // =========================================================================

    /// The rewards ledger.
    #[must_use]
    pub const fn rewards(&self) -> &RewardsLedger {
        &self.rewards
    }

    /// Open checkout for the current cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart is empty.
    pub fn start_checkout(&mut self) -> Result<(), CheckoutError> {
        self.checkout.start(self.cart.cart())
    }

    /// Issue a mock OTP for `phone`.
    ///
    /// # Errors
    ///
    /// See [`Checkout::send_otp`].
    pub fn send_otp(&mut self, phone: &str) -> Result<(), CheckoutError> {
        self.checkout.send_otp(phone)
    }

    /// Verify the entered code and take the mock payment.
    ///
    /// # Errors
    ///
    /// See [`Checkout::verify`].
    pub fn verify_otp(&mut self, guess: &str) -> Result<PaymentReceipt, CheckoutError> {
        self.checkout
            .verify(guess, &mut self.cart, &mut self.rewards)
    }

    /// Close checkout.
    pub fn close_checkout(&mut self) {
        self.checkout.close();
    }

    /// The checkout session.
    #[must_use]
    pub const fn checkout_session(&self) -> &CheckoutSession {
        self.checkout.session()
    }

    /// The checkout state machine, for callers that need the pending code.
    #[must_use]
    pub const fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    /// Mutable access to the checkout, for callers supplying their own RNG.
    pub const fn checkout_mut(&mut self) -> &mut Checkout {
        &mut self.checkout
    }
}
