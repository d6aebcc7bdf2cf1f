//! Mock OTP checkout.
//!
//! ```text
//! Idle --start--> PhoneEntry --send_otp--> OtpSent --verify--> Verified
//!   ^                                                             |
//!   +---------------------------- close (any phase) --------------+
//! ```
//!
//! NOT a real payment or authentication flow. The "OTP" is a random
//! six-digit number generated here, announced only in the server log and
//! checked against user input locally. There is no SMS, no payment
//! processor and no server round-trip. Keep it that way unless a real
//! integration is designed on purpose.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use credshop_core::{CheckoutPhase, OneTimeCode, PhoneNumber, PhoneNumberError, Price, RewardPoints};

use crate::cart::{Cart, CartStore};
use crate::rewards::RewardsLedger;
use crate::storage::{self, KeyValueStore, keys};

/// Notice shown after a mock code is issued.
pub const OTP_SENT_NOTICE: &str = "Mock OTP sent. Check the server log.";

/// Notice shown after a successful mock payment.
pub const PAYMENT_SUCCESS_NOTICE: &str = "Payment successful! Rewards credited.";

/// Rejected checkout actions. The message is shown to the user as is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Checkout needs at least one cart line.
    #[error("Cart is empty")]
    EmptyCart,

    /// The phone number is not ten digits.
    #[error("Enter a valid 10-digit phone number")]
    InvalidPhone(#[source] PhoneNumberError),

    /// No code is pending in session storage.
    #[error("OTP not generated")]
    OtpNotGenerated,

    /// The entered code does not match.
    #[error("Invalid OTP")]
    InvalidOtp,

    /// The action needs an open checkout.
    #[error("Checkout is not open")]
    NotOpen,

    /// Verification before a code was requested.
    #[error("Request an OTP first")]
    OtpNotRequested,

    /// A code was already issued in this checkout.
    #[error("OTP already sent")]
    OtpAlreadySent,
}

/// Record of a successful mock payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentReceipt {
    /// Cart total at the time of payment, in the source currency.
    pub total: Price,
    /// Points earned by this payment.
    pub points_earned: RewardPoints,
    /// Rewards balance after crediting.
    pub rewards_balance: RewardPoints,
    /// When the payment was recorded.
    pub paid_at: DateTime<Utc>,
}

/// Ephemeral checkout state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutSession {
    phase: CheckoutPhase,
    phone: String,
    otp_input: String,
    receipt: Option<PaymentReceipt>,
}

impl CheckoutSession {
    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    /// Phone number as last entered.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Code as last entered.
    #[must_use]
    pub fn otp_input(&self) -> &str {
        &self.otp_input
    }

    /// Whether a code has been issued in this checkout.
    #[must_use]
    pub const fn otp_sent(&self) -> bool {
        self.phase.otp_issued()
    }

    /// Whether the payment went through.
    #[must_use]
    pub fn payment_succeeded(&self) -> bool {
        self.phase == CheckoutPhase::Verified
    }

    /// Receipt of the payment, once verified.
    #[must_use]
    pub const fn receipt(&self) -> Option<&PaymentReceipt> {
        self.receipt.as_ref()
    }
}

/// The checkout state machine and its session-scoped code store.
pub struct Checkout {
    session: CheckoutSession,
    otp_store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for Checkout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checkout")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl Checkout {
    /// Create a closed checkout. `otp_store` must be session-scoped.
    #[must_use]
    pub fn new(otp_store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            session: CheckoutSession::default(),
            otp_store,
        }
    }

    /// Current session state.
    #[must_use]
    pub const fn session(&self) -> &CheckoutSession {
        &self.session
    }

    /// Open the checkout.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart has no lines; the
    /// checkout then stays as it was.
    pub fn start(&mut self, cart: &Cart) -> Result<(), CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        self.session.phase = CheckoutPhase::PhoneEntry;
        self.session.otp_input.clear();
        self.session.receipt = None;
        Ok(())
    }

    /// Validate the phone number and issue a mock code.
    ///
    /// # Errors
    ///
    /// Rejects a malformed phone number, a closed checkout, or a checkout
    /// that already issued a code. The phase is unchanged on error.
    pub fn send_otp(&mut self, phone: &str) -> Result<(), CheckoutError> {
        self.send_otp_with_rng(phone, &mut rand::rng())
    }

    /// [`Checkout::send_otp`] with a caller-supplied random source.
    ///
    /// # Errors
    ///
    /// See [`Checkout::send_otp`].
    pub fn send_otp_with_rng<R: Rng>(&mut self, phone: &str, rng: &mut R) -> Result<(), CheckoutError> {
        match self.session.phase {
            CheckoutPhase::Idle => return Err(CheckoutError::NotOpen),
            CheckoutPhase::OtpSent | CheckoutPhase::Verified => {
                return Err(CheckoutError::OtpAlreadySent);
            }
            CheckoutPhase::PhoneEntry => {}
        }

        phone.clone_into(&mut self.session.phone);
        let phone = PhoneNumber::parse(phone).map_err(CheckoutError::InvalidPhone)?;

        let code = OneTimeCode::from_offset(rng.random_range(0..OneTimeCode::SPAN));
        storage::write_best_effort(
            keys::MOCK_OTP,
            self.otp_store.set(keys::MOCK_OTP, &code.to_string()),
        );

        // Simulated SMS delivery: the log line is the only channel.
        tracing::info!(
            otp = %code,
            phone = %phone.masked(),
            "Mock OTP issued (simulation, not a real one-time password)"
        );

        self.session.phase = CheckoutPhase::OtpSent;
        Ok(())
    }

    /// Check `guess` against the pending code and record the payment.
    ///
    /// On success the reward for the cart total is credited, the cart is
    /// emptied and the pending code is erased.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::OtpNotGenerated`] if no code is pending
    /// - [`CheckoutError::InvalidOtp`] if the guess does not match; the
    ///   user may retry without limit
    /// - [`CheckoutError::NotOpen`] / [`CheckoutError::OtpNotRequested`] if
    ///   no code was requested in this checkout
    pub fn verify(
        &mut self,
        guess: &str,
        cart: &mut CartStore,
        rewards: &mut RewardsLedger,
    ) -> Result<PaymentReceipt, CheckoutError> {
        match self.session.phase {
            CheckoutPhase::Idle => return Err(CheckoutError::NotOpen),
            CheckoutPhase::PhoneEntry => return Err(CheckoutError::OtpNotRequested),
            CheckoutPhase::OtpSent | CheckoutPhase::Verified => {}
        }

        guess.clone_into(&mut self.session.otp_input);

        let code = self.pending_code().ok_or(CheckoutError::OtpNotGenerated)?;
        if !code.matches(guess) {
            tracing::debug!("Mock OTP mismatch");
            return Err(CheckoutError::InvalidOtp);
        }

        let total = cart.cart().total();
        let points_earned = rewards.credit_payment(total);
        cart.clear();
        storage::write_best_effort(keys::MOCK_OTP, self.otp_store.remove(keys::MOCK_OTP));

        let receipt = PaymentReceipt {
            total,
            points_earned,
            rewards_balance: rewards.balance(),
            paid_at: Utc::now(),
        };
        tracing::info!(
            total = %receipt.total,
            points_earned = receipt.points_earned.value(),
            "Mock payment verified"
        );

        self.session.phase = CheckoutPhase::Verified;
        self.session.receipt = Some(receipt.clone());
        Ok(receipt)
    }

    /// Close the checkout. Nothing already committed is undone.
    pub fn close(&mut self) {
        self.session.phase = CheckoutPhase::Idle;
    }

    /// The code waiting in session storage, if any.
    #[must_use]
    pub fn pending_code(&self) -> Option<OneTimeCode> {
        match self.otp_store.get(keys::MOCK_OTP) {
            Ok(Some(raw)) => OneTimeCode::parse(&raw)
                .inspect_err(|e| tracing::warn!(error = %e, "Ignoring malformed pending OTP"))
                .ok(),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read pending OTP");
                None
            }
        }
    }
}
