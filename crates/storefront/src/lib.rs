//! CREDshop storefront library.
//!
//! The catalog, cart, rewards and mock checkout behind a single [`shop::Shop`]
//! controller, plus the axum routes that render it. Exposed as a library so
//! the CLI and the integration tests can drive it directly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod filter;
pub mod middleware;
pub mod rewards;
pub mod routes;
pub mod shop;
pub mod state;
pub mod storage;
