//! Mock OTP checkout driven through the `Shop` controller.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use credshop_core::{CheckoutPhase, ProductId, RewardPoints};
use credshop_integration_tests::{fixture_products, memory_shop, memory_store};
use tempfile::tempdir;
use credshop_storefront::catalog::Catalog;
use credshop_storefront::checkout::CheckoutError;
use credshop_storefront::shop::Shop;
use credshop_storefront::storage::{FileStore, KeyValueStore, MemoryStore, keys};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn add(shop: &mut Shop, id: i64, qty: u32) {
    let product = shop.product(ProductId::new(id)).cloned().unwrap();
    shop.add_to_cart(&product, qty);
}

fn pending_code(shop: &Shop) -> String {
    shop.checkout().pending_code().unwrap().to_string()
}

// =============================================================================
// Opening checkout
// =============================================================================

#[test]
fn test_empty_cart_does_not_open_checkout() {
    let mut shop = memory_shop();
    assert_eq!(shop.start_checkout(), Err(CheckoutError::EmptyCart));
    assert_eq!(shop.checkout_session().phase(), CheckoutPhase::Idle);
    assert!(shop.cart().is_empty());
    assert_eq!(shop.rewards().balance(), RewardPoints::ZERO);
}

#[test]
fn test_actions_before_start_are_rejected() {
    let mut shop = memory_shop();
    add(&mut shop, 1, 1);
    assert_eq!(shop.send_otp("1234567890"), Err(CheckoutError::NotOpen));
    assert_eq!(shop.verify_otp("123456").map(|_| ()), Err(CheckoutError::NotOpen));
    assert!(shop.checkout().pending_code().is_none());
}

// =============================================================================
// Phone and OTP
// =============================================================================

#[test]
fn test_short_phone_rejected_ten_digits_accepted() {
    let mut shop = memory_shop();
    add(&mut shop, 1, 1);
    shop.start_checkout().unwrap();

    let err = shop.send_otp("12345").unwrap_err();
    assert_eq!(err.to_string(), "Enter a valid 10-digit phone number");
    assert_eq!(shop.checkout_session().phase(), CheckoutPhase::PhoneEntry);
    assert!(!shop.checkout_session().otp_sent());

    for bad in ["12345678901", "12345abcde", "", "123 456 789"] {
        assert!(shop.send_otp(bad).is_err(), "{bad:?} accepted");
    }

    shop.send_otp("1234567890").unwrap();
    assert!(shop.checkout_session().otp_sent());
    let code = pending_code(&shop);
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
    assert_ne!(code.chars().next(), Some('0'));
}

#[test]
fn test_seeded_codes_are_six_digits() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..200 {
        let mut shop = memory_shop();
        add(&mut shop, 2, 1);
        shop.start_checkout().unwrap();
        shop.checkout_mut()
            .send_otp_with_rng("9876543210", &mut rng)
            .unwrap();
        let value = shop.checkout().pending_code().unwrap().value();
        assert!((100_000..=999_999).contains(&value));
    }
}

#[test]
fn test_verify_before_otp_requested() {
    let mut shop = memory_shop();
    add(&mut shop, 1, 1);
    shop.start_checkout().unwrap();
    assert_eq!(
        shop.verify_otp("123456").map(|_| ()),
        Err(CheckoutError::OtpNotRequested)
    );
}

// =============================================================================
// Payment
// =============================================================================

#[test]
fn test_correct_otp_pays_and_credits_rewards() {
    let mut shop = memory_shop();
    // 2 x 109.95 + 22.30 = 242.20; 2% = 4.844 -> 5
    add(&mut shop, 1, 2);
    add(&mut shop, 2, 1);
    let pre_total = shop.cart().total();

    shop.start_checkout().unwrap();
    shop.send_otp("9876543210").unwrap();
    let code = pending_code(&shop);

    let receipt = shop.verify_otp(&code).unwrap();
    assert_eq!(receipt.total, pre_total);
    assert_eq!(receipt.points_earned, RewardPoints::new(5));
    assert_eq!(receipt.rewards_balance, RewardPoints::new(5));
    assert!(shop.cart().is_empty());
    assert_eq!(shop.rewards().balance(), RewardPoints::new(5));
    assert!(shop.checkout().pending_code().is_none());
    assert!(shop.checkout_session().payment_succeeded());

    // The same code again: nothing pending, nothing credited
    assert_eq!(
        shop.verify_otp(&code).map(|_| ()),
        Err(CheckoutError::OtpNotGenerated)
    );
    assert_eq!(shop.rewards().balance(), RewardPoints::new(5));
}

#[test]
fn test_wrong_otp_changes_nothing() {
    let mut shop = memory_shop();
    add(&mut shop, 3, 1);
    shop.start_checkout().unwrap();
    shop.send_otp("9876543210").unwrap();
    let code = pending_code(&shop);
    let wrong = if code == "111111" { "222222" } else { "111111" };

    for _ in 0..3 {
        assert_eq!(
            shop.verify_otp(wrong).map(|_| ()),
            Err(CheckoutError::InvalidOtp)
        );
    }
    assert_eq!(shop.checkout_session().phase(), CheckoutPhase::OtpSent);
    assert_eq!(shop.cart().len(), 1);
    assert_eq!(shop.rewards().balance(), RewardPoints::ZERO);

    // Unlimited retries: the right code still works
    shop.verify_otp(&code).unwrap();
    // 695.00 * 0.02 = 13.9 -> 14
    assert_eq!(shop.rewards().balance(), RewardPoints::new(14));
}

#[test]
fn test_rewards_accumulate_across_payments() {
    let mut shop = memory_shop();
    for _ in 0..3 {
        // 64.00 * 0.02 = 1.28 -> 1
        add(&mut shop, 4, 1);
        shop.start_checkout().unwrap();
        shop.send_otp("9876543210").unwrap();
        let code = pending_code(&shop);
        shop.verify_otp(&code).unwrap();
        shop.close_checkout();
    }
    assert_eq!(shop.rewards().balance(), RewardPoints::new(3));
}

#[test]
fn test_close_then_restart_resets_flags() {
    let mut shop = memory_shop();
    add(&mut shop, 1, 1);
    shop.start_checkout().unwrap();
    shop.send_otp("1234567890").unwrap();
    assert_eq!(shop.send_otp("1234567890"), Err(CheckoutError::OtpAlreadySent));
    shop.close_checkout();

    shop.start_checkout().unwrap();
    let session = shop.checkout_session();
    assert_eq!(session.phase(), CheckoutPhase::PhoneEntry);
    assert!(!session.otp_sent());
    assert!(!session.payment_succeeded());
    assert_eq!(session.otp_input(), "");
    assert_eq!(session.phone(), "1234567890");
}

// =============================================================================
// Restart
// =============================================================================

#[test]
fn test_cart_and_rewards_survive_restart_pending_otp_does_not() {
    let dir = tempdir().unwrap();
    let durable: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path()));

    let mut shop = Shop::restore(durable.clone(), memory_store());
    shop.replace_catalog(Catalog::from_products(fixture_products()));

    // First purchase to build up a balance
    add(&mut shop, 1, 1);
    shop.start_checkout().unwrap();
    shop.send_otp("1234567890").unwrap();
    let code = pending_code(&shop);
    shop.verify_otp(&code).unwrap();

    // Second cart, left mid-checkout
    add(&mut shop, 5, 3);
    shop.start_checkout().unwrap();
    shop.send_otp("1234567890").unwrap();
    let cart_before = shop.cart().clone();
    let balance_before = shop.rewards().balance();
    drop(shop);

    // Restart: same durable directory, fresh session store
    let session: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let mut restarted = Shop::restore(durable.clone(), session.clone());
    assert_eq!(restarted.cart(), &cart_before);
    assert_eq!(restarted.rewards().balance(), balance_before);
    assert!(session.get(keys::MOCK_OTP).unwrap().is_none());
    assert_eq!(restarted.checkout_session().phase(), CheckoutPhase::Idle);

    // The old code is gone, so a new one has to be requested
    restarted.start_checkout().unwrap();
    assert!(restarted.checkout().pending_code().is_none());
    restarted.send_otp("1234567890").unwrap();
    assert!(restarted.checkout().pending_code().is_some());
}

#[test]
fn test_corrupt_durable_state_falls_back_to_empty() {
    let dir = tempdir().unwrap();
    let durable: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path()));
    durable.set(keys::CART, "{\"not\": \"a cart\"}").unwrap();
    durable.set(keys::REWARDS, "many").unwrap();

    let shop = Shop::restore(durable, memory_store());
    assert!(shop.cart().is_empty());
    assert_eq!(shop.rewards().balance(), RewardPoints::ZERO);
}
