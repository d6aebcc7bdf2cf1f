//! CREDshop Core - Shared types library.
//!
//! This crate provides common types used across all CREDshop components:
//! - `storefront` - Catalog, cart, mock checkout and the HTTP surface
//! - `cli` - Command-line tools for the persisted cart and rewards
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, phone numbers,
//!   one-time codes, reward points and checkout phases

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
