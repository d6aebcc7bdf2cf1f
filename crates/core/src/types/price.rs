//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices arrive in the source currency (US dollars on the public
//! catalog API). The storefront renders them in rupees by multiplying with a
//! fixed rate, [`INR_PER_SOURCE_UNIT`]. That conversion is display-only: cart
//! totals, persisted carts and reward calculations all stay in the source
//! currency.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Fixed display multiplier from the source currency to rupees.
pub const INR_PER_SOURCE_UNIT: i64 = 80;

/// A price in the catalog's source currency.
///
/// Serializes as a decimal string (`"109.95"`) and deserializes from either
/// a string or a JSON number, so both the upstream catalog payload and the
/// persisted cart snapshot parse without loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an integer number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The amount in the source currency.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Whole rupees shown for this price (`round(amount × 80)`).
    #[must_use]
    pub fn inr_rounded(&self) -> i64 {
        round_half_up(self.0.saturating_mul(Decimal::from(INR_PER_SOURCE_UNIT)))
            .to_i64()
            .unwrap_or(i64::MAX)
    }

    /// Format for display in rupees (e.g., "₹8796").
    #[must_use]
    pub fn display_inr(&self) -> String {
        format!("₹{}", self.inr_rounded())
    }
}

/// Round to the nearest integer, halves away from zero.
///
/// Prices are never negative, so this matches round-half-up.
#[must_use]
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Saturates at `Decimal::MAX` instead of panicking.
impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_from_json_number() {
        let price: Price = serde_json::from_str("109.95").unwrap();
        assert_eq!(price, Price::from_cents(10995));
    }

    #[test]
    fn test_serialize_as_string_round_trips() {
        let price = Price::from_cents(2230);
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"22.30\"");
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
    }

    #[test]
    fn test_inr_display_rounds_half_up() {
        // 109.95 * 80 = 8796
        assert_eq!(Price::from_cents(10995).display_inr(), "₹8796");
        // 0.01 * 80 = 0.8 -> 1
        assert_eq!(Price::from_cents(1).inr_rounded(), 1);
        // 0.00625 * 80 = 0.5 -> 1
        assert_eq!(Price::new(Decimal::new(625, 5)).inr_rounded(), 1);
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [Price::from_cents(1000).times(2), Price::from_cents(550)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(2550));
        assert_eq!(total.to_string(), "25.50");
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let huge: Price = serde_json::from_str("1e20").unwrap();
        let line = huge.times(u32::MAX);
        assert_eq!(line.amount(), Decimal::MAX);

        let total: Price = [line, line, Price::from_cents(1)].into_iter().sum();
        assert_eq!(total.amount(), Decimal::MAX);
        assert_eq!(total.inr_rounded(), i64::MAX);
    }
}
