//! Six-digit one-time code for the mock payment flow.
//!
//! This is NOT a real one-time password. Codes are generated and checked by
//! the storefront itself with no delivery channel and no server round-trip.
//! It exists to simulate the shape of an OTP checkout and nothing more.

use core::fmt;
use core::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`OneTimeCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OneTimeCodeError {
    /// The value is outside `100000..=999999`.
    #[error("one-time code must be six digits (got {0})")]
    OutOfRange(u32),
    /// The stored text is not a number.
    #[error("one-time code is not numeric: {0:?}")]
    NotNumeric(String),
}

/// A six-digit mock one-time code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct OneTimeCode(u32);

impl OneTimeCode {
    /// The range generated codes are drawn from.
    pub const RANGE: RangeInclusive<u32> = 100_000..=999_999;

    /// Number of distinct codes.
    pub const SPAN: u32 = 900_000;

    /// Create a code from a number.
    ///
    /// # Errors
    ///
    /// Returns an error if the number is not six digits long.
    pub fn new(value: u32) -> Result<Self, OneTimeCodeError> {
        if Self::RANGE.contains(&value) {
            Ok(Self(value))
        } else {
            Err(OneTimeCodeError::OutOfRange(value))
        }
    }

    /// Map any number onto a valid code: `100000 + offset % 900000`.
    ///
    /// Feed it a uniform draw from `0..SPAN` to get a uniform code.
    #[must_use]
    pub const fn from_offset(offset: u32) -> Self {
        Self(100_000 + offset % Self::SPAN)
    }

    /// Parse a code previously written with [`OneTimeCode::to_string`].
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a six-digit number.
    pub fn parse(s: &str) -> Result<Self, OneTimeCodeError> {
        let value = s
            .parse::<u32>()
            .map_err(|_| OneTimeCodeError::NotNumeric(s.to_owned()))?;
        Self::new(value)
    }

    /// The numeric value of the code.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Whether user input matches this code.
    ///
    /// Comparison is exact string equality against the six digits; input
    /// with whitespace or leading zeros does not match.
    #[must_use]
    pub fn matches(&self, input: &str) -> bool {
        input == self.to_string()
    }
}

impl fmt::Display for OneTimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for OneTimeCode {
    type Error = OneTimeCodeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OneTimeCode> for u32 {
    fn from(code: OneTimeCode) -> Self {
        code.0
    }
}
