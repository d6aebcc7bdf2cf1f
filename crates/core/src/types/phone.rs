//! Phone number type for the mock payment flow.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneNumberError {
    /// The input does not have exactly ten characters.
    #[error("phone number must be exactly {expected} digits (got {got})")]
    WrongLength {
        /// Required number of digits.
        expected: usize,
        /// Number of characters supplied.
        got: usize,
    },
    /// The input contains something other than ASCII digits.
    #[error("phone number must contain only digits 0-9")]
    NonDigit,
}

/// A ten-digit phone number.
///
/// ## Constraints
///
/// - Exactly 10 characters
/// - Every character is an ASCII digit (`0-9`); no spaces, `+`, or dashes
///
/// ## Examples
///
/// ```
/// use credshop_core::PhoneNumber;
///
/// assert!(PhoneNumber::parse("1234567890").is_ok());
///
/// assert!(PhoneNumber::parse("12345").is_err());        // too short
/// assert!(PhoneNumber::parse("123-456-7890").is_err()); // punctuation
/// assert!(PhoneNumber::parse(" 1234567890").is_err());  // not trimmed
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Number of digits in a valid phone number.
    pub const DIGITS: usize = 10;

    /// Parse a `PhoneNumber` from a string.
    ///
    /// The input is taken verbatim: surrounding whitespace is rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly ten ASCII digits.
    pub fn parse(s: &str) -> Result<Self, PhoneNumberError> {
        let got = s.chars().count();
        if got != Self::DIGITS {
            return Err(PhoneNumberError::WrongLength {
                expected: Self::DIGITS,
                got,
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PhoneNumberError::NonDigit);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the number with all but the last four digits masked.
    #[must_use]
    pub fn masked(&self) -> String {
        let visible = self.0.get(Self::DIGITS - 4..).unwrap_or_default();
        format!("******{visible}")
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = PhoneNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = PhoneNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
