//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneNumberError {
    /// The input is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input is not exactly ten ASCII digits.
    #[error("Phone number must be {len} digits")]
    Format {
        /// Required number of digits.
        len: usize,
    },
}

/// A ten digit phone number, stored without separators.
///
/// ```
/// use pet_city_core::PhoneNumber;
///
/// assert!(PhoneNumber::parse("2101234567").is_ok());
/// assert!(PhoneNumber::parse("210-123-4567").is_err());
/// assert!(PhoneNumber::parse("21012345").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Number of digits in a phone number.
    pub const DIGITS: usize = 10;

    /// Parse a `PhoneNumber`, ignoring surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `PhoneNumberError::Empty` for blank input and
    /// `PhoneNumberError::Format` unless the input is exactly ten ASCII digits.
    pub fn parse(s: &str) -> Result<Self, PhoneNumberError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PhoneNumberError::Empty);
        }

        if s.len() != Self::DIGITS || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PhoneNumberError::Format { len: Self::DIGITS });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
