//! Phone number type.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Optional `+`, a non-zero leading digit, then 3 to 14 more digits.
static PHONE_DIGITS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // literal pattern
    Regex::new(r"^\+?[1-9][0-9]{3,14}$").unwrap()
});

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The digits do not form a 4 to 15 digit number without a leading zero.
    #[error("phone number must have 4 to 15 digits and not start with 0")]
    InvalidFormat,
}

/// A phone number, kept exactly as entered.
///
/// Spaces, hyphens and parentheses are formatting only: they are ignored when
/// checking the number but preserved in the stored value. What remains must
/// be an optional `+` followed by 4 to 15 digits, the first of which is not
/// `0`. There is no country-code awareness.
///
/// ```
/// use contact_book_core::Phone;
///
/// assert!(Phone::parse("+1 (202) 555-0123").is_ok());
/// assert!(Phone::parse("1234").is_ok());
///
/// assert!(Phone::parse("0123456").is_err()); // leading zero
/// assert!(Phone::parse("123").is_err());     // too short
/// assert!(Phone::parse("not-a-phone").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError::Empty`] for an empty string and
    /// [`PhoneError::InvalidFormat`] when the stripped digits do not match.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        if !PHONE_DIGITS_PATTERN.is_match(&strip_formatting(s)) {
            return Err(PhoneError::InvalidFormat);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Remove whitespace, hyphens and parentheses.
fn strip_formatting(s: &str) -> String {
    s.chars()
        .filter(|c| !(c.is_whitespace() || matches!(c, '-' | '(' | ')')))
        .collect()
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
