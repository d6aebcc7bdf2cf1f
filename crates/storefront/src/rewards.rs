//! Loyalty rewards balance.
//!
//! The balance is stored as a plain decimal string under
//! [`keys::REWARDS`] and only ever grows.

use std::sync::Arc;

use credshop_core::{Price, RewardPoints};

use crate::storage::{self, KeyValueStore, keys};

/// The persisted rewards balance.
pub struct RewardsLedger {
    balance: RewardPoints,
    storage: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for RewardsLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewardsLedger")
            .field("balance", &self.balance)
            .finish_non_exhaustive()
    }
}

impl RewardsLedger {
    /// Load the balance. Missing or unparseable values read as zero.
    #[must_use]
    pub fn restore(storage: Arc<dyn KeyValueStore>) -> Self {
        let balance = match storage.get(keys::REWARDS) {
            Ok(Some(raw)) => parse_balance(&raw),
            Ok(None) => RewardPoints::ZERO,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable rewards balance");
                RewardPoints::ZERO
            }
        };

        Self { balance, storage }
    }

    /// Current balance.
    #[must_use]
    pub const fn balance(&self) -> RewardPoints {
        self.balance
    }

    /// Credit the reward for paying `total` and persist the new balance.
    ///
    /// Returns the points earned by this payment.
    pub fn credit_payment(&mut self, total: Price) -> RewardPoints {
        let earned = RewardPoints::earned_on(total);
        self.balance = self.balance.saturating_add(earned);
        storage::write_best_effort(
            keys::REWARDS,
            self.storage
                .set(keys::REWARDS, &self.balance.value().to_string()),
        );
        tracing::info!(
            earned = earned.value(),
            balance = self.balance.value(),
            "Rewards credited"
        );
        earned
    }
}

fn parse_balance(raw: &str) -> RewardPoints {
    raw.trim().parse::<u64>().map_or_else(
        |_| {
            tracing::warn!(value = %raw, "Ignoring malformed rewards balance");
            RewardPoints::ZERO
        },
        RewardPoints::new,
    )
}
