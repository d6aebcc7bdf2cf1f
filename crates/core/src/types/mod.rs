//! Core types for CREDshop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod otp;
pub mod phone;
pub mod points;
pub mod price;
pub mod status;

pub use id::*;
pub use otp::{OneTimeCode, OneTimeCodeError};
pub use phone::{PhoneNumber, PhoneNumberError};
pub use points::RewardPoints;
pub use price::{INR_PER_SOURCE_UNIT, Price};
pub use status::CheckoutPhase;
