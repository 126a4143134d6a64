//! Dog age type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`DogAge`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DogAgeError {
    /// The input is not a whole number.
    #[error("Age must be a whole number")]
    NotANumber,
    /// Below the minimum age.
    #[error("Age must be at least {min}")]
    TooYoung {
        /// Minimum age in years.
        min: i32,
    },
    /// Above the maximum age.
    #[error("Age must not exceed {max}")]
    TooOld {
        /// Maximum age in years.
        max: i32,
    },
}

/// A dog's age in whole years, between 1 and 32 inclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "i32", into = "i32")]
pub struct DogAge(i32);

impl DogAge {
    /// Youngest accepted age.
    pub const MIN: i32 = 1;
    /// Oldest accepted age.
    pub const MAX: i32 = 32;

    /// Create an age from a number of years.
    ///
    /// # Errors
    ///
    /// Returns `DogAgeError::TooYoung` or `DogAgeError::TooOld` when out of range.
    pub const fn new(years: i32) -> Result<Self, DogAgeError> {
        if years < Self::MIN {
            return Err(DogAgeError::TooYoung { min: Self::MIN });
        }
        if years > Self::MAX {
            return Err(DogAgeError::TooOld { max: Self::MAX });
        }
        Ok(Self(years))
    }

    /// Parse an age from form input.
    ///
    /// # Errors
    ///
    /// Returns `DogAgeError::NotANumber` if the input is not an integer, otherwise
    /// the range errors of [`DogAge::new`].
    pub fn parse(s: &str) -> Result<Self, DogAgeError> {
        let years = s
            .trim()
            .parse::<i32>()
            .map_err(|_| DogAgeError::NotANumber)?;
        Self::new(years)
    }

    /// Get the age in years.
    #[must_use]
    pub const fn years(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for DogAge {
    type Error = DogAgeError;

    fn try_from(years: i32) -> Result<Self, Self::Error> {
        Self::new(years)
    }
}

impl From<DogAge> for i32 {
    fn from(age: DogAge) -> Self {
        age.0
    }
}

impl fmt::Display for DogAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range() {
        assert_eq!(DogAge::new(0), Err(DogAgeError::TooYoung { min: 1 }));
        assert!(DogAge::new(1).is_ok());
        assert!(DogAge::new(32).is_ok());
        assert_eq!(DogAge::new(33), Err(DogAgeError::TooOld { max: 32 }));
    }

    #[test]
    fn test_parse_form_input() {
        assert_eq!(DogAge::parse(" 7 ").map(|a| a.years()), Ok(7));
        assert_eq!(DogAge::parse("seven"), Err(DogAgeError::NotANumber));
        assert_eq!(DogAge::parse("2.5"), Err(DogAgeError::NotANumber));
        assert_eq!(DogAge::parse("-3"), Err(DogAgeError::TooYoung { min: 1 }));
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<DogAge>("12").is_ok());
        assert!(serde_json::from_str::<DogAge>("40").is_err());
    }
}
