//! Loyalty reward points.

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::price::{Price, round_half_up};

/// A non-negative balance of reward points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RewardPoints(u64);

impl RewardPoints {
    /// No points.
    pub const ZERO: Self = Self(0);

    /// Reward rate applied to a paid total, in percent.
    pub const RATE_PERCENT: i64 = 2;

    /// Create a balance.
    #[must_use]
    pub const fn new(points: u64) -> Self {
        Self(points)
    }

    /// The number of points.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Points earned for paying `total`: `round(total × 0.02)`.
    #[must_use]
    pub fn earned_on(total: Price) -> Self {
        let raw = total.amount() * Decimal::new(Self::RATE_PERCENT, 2);
        Self(round_half_up(raw).to_u64().unwrap_or(u64::MAX))
    }

    /// Add points, saturating at `u64::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for RewardPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earned_on_rounds_to_nearest() {
        // 109.95 * 0.02 = 2.199 -> 2
        assert_eq!(RewardPoints::earned_on(Price::from_cents(10995)).value(), 2);
        // 125.00 * 0.02 = 2.5 -> 3
        assert_eq!(RewardPoints::earned_on(Price::from_cents(12500)).value(), 3);
        // 24.99 * 0.02 = 0.4998 -> 0
        assert_eq!(RewardPoints::earned_on(Price::from_cents(2499)).value(), 0);
        assert_eq!(RewardPoints::earned_on(Price::ZERO), RewardPoints::ZERO);
    }

    #[test]
    fn test_saturating_add() {
        let sum = RewardPoints::new(3).saturating_add(RewardPoints::new(4));
        assert_eq!(sum.value(), 7);
        let max = RewardPoints::new(u64::MAX).saturating_add(RewardPoints::new(1));
        assert_eq!(max.value(), u64::MAX);
    }
}
