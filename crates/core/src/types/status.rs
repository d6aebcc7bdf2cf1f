//! Status enums for the checkout flow.

use serde::{Deserialize, Serialize};

/// Phase of the mock checkout.
///
/// ```text
/// Idle -> PhoneEntry -> OtpSent -> Verified
/// ```
///
/// Closing the checkout returns to `Idle` from any phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutPhase {
    /// Checkout overlay closed.
    #[default]
    Idle,
    /// Waiting for a phone number.
    PhoneEntry,
    /// A mock code was issued; waiting for the user to enter it.
    OtpSent,
    /// The code matched and the payment was recorded.
    Verified,
}

impl CheckoutPhase {
    /// Whether the checkout overlay is visible in this phase.
    #[must_use]
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Whether a code has been issued in this session.
    #[must_use]
    pub const fn otp_issued(self) -> bool {
        matches!(self, Self::OtpSent | Self::Verified)
    }
}

impl std::fmt::Display for CheckoutPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::PhoneEntry => write!(f, "phone_entry"),
            Self::OtpSent => write!(f, "otp_sent"),
            Self::Verified => write!(f, "verified"),
        }
    }
}
