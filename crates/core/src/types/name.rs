//! Length-bounded display names for owners and dogs.

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a bounded name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// The input is empty or only whitespace.
    #[error("must not be blank")]
    Blank,
    /// The input length is outside the allowed range.
    #[error("must be between {min} and {max} characters")]
    Length {
        /// Minimum number of characters.
        min: usize,
        /// Maximum number of characters.
        max: usize,
    },
}

/// Define a trimmed string newtype whose character count must fall in `min..=max`.
macro_rules! bounded_name {
    ($(#[$meta:meta])* $name:ident, $min:expr, $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Minimum number of characters.
            pub const MIN_LENGTH: usize = $min;
            /// Maximum number of characters.
            pub const MAX_LENGTH: usize = $max;

            /// Parse a name, trimming surrounding whitespace.
            ///
            /// # Errors
            ///
            /// Returns `NameError::Blank` for blank input and `NameError::Length`
            /// when the trimmed character count is out of range.
            pub fn parse(s: &str) -> Result<Self, NameError> {
                let s = s.trim();
                if s.is_empty() {
                    return Err(NameError::Blank);
                }

                let len = s.chars().count();
                if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&len) {
                    return Err(NameError::Length {
                        min: Self::MIN_LENGTH,
                        max: Self::MAX_LENGTH,
                    });
                }

                Ok(Self(s.to_owned()))
            }

            /// Returns the name as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

bounded_name!(
    /// A pet owner's first or last name (3-50 characters).
    PersonName,
    3,
    50
);

bounded_name!(
    /// A dog's name (2-50 characters).
    DogName,
    2,
    50
);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_person_name_bounds() {
        assert_eq!(
            PersonName::parse("Al"),
            Err(NameError::Length { min: 3, max: 50 })
        );
        assert!(PersonName::parse("Ada").is_ok());
        assert!(PersonName::parse(&"x".repeat(50)).is_ok());
        assert!(PersonName::parse(&"x".repeat(51)).is_err());
    }

    #[test]
    fn test_dog_name_bounds() {
        assert!(DogName::parse("Bo").is_ok());
        assert_eq!(
            DogName::parse("B"),
            Err(NameError::Length { min: 2, max: 50 })
        );
    }

    #[test]
    fn test_blank_is_not_a_length_error() {
        assert_eq!(PersonName::parse("   "), Err(NameError::Blank));
        assert_eq!(DogName::parse(""), Err(NameError::Blank));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // 3 characters, 6 bytes.
        assert!(PersonName::parse("Ηρώ").is_ok());
    }

    #[test]
    fn test_trims() {
        assert_eq!(DogName::parse("  Rex ").unwrap().as_str(), "Rex");
    }
}
