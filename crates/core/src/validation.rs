//! Contact validation rules.
//!
//! A single ordered table, [`RULES`], describes every check a contact must
//! pass. The server walks it and stops at the first failure; the client walks
//! it and collects one error per field so every bad input can be highlighted
//! at once.
//!
//! Rules run against trimmed values. Uniqueness of the email address needs
//! storage and is not part of this module.

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Email, Phone};

/// A user-editable contact field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Address,
    Email,
    Phone,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Self; 5] = [
        Self::FirstName,
        Self::LastName,
        Self::Address,
        Self::Email,
        Self::Phone,
    ];

    /// The JSON key of this field.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Address => "address",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Address => "Address",
            Self::Email => "Email",
            Self::Phone => "Phone",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single check applied to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// The trimmed value must not be empty.
    Required,
    /// The value must be an [`Email`].
    EmailFormat,
    /// The value must be a [`Phone`].
    PhoneFormat,
}

impl Rule {
    /// Check a trimmed value against this rule.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] describing the failure.
    pub fn check(self, field: Field, value: &str) -> Result<(), ValidationError> {
        match self {
            Self::Required if value.is_empty() => Err(ValidationError::MissingField(field)),
            Self::Required => Ok(()),
            Self::EmailFormat => Email::parse(value)
                .map(drop)
                .map_err(|_| ValidationError::InvalidEmailFormat),
            Self::PhoneFormat => Phone::parse(value)
                .map(drop)
                .map_err(|_| ValidationError::InvalidPhoneFormat),
        }
    }
}

/// Every validation rule, in the order they are applied.
///
/// All presence checks come first, then the email format, then the phone
/// format.
pub const RULES: &[(Field, Rule)] = &[
    (Field::FirstName, Rule::Required),
    (Field::LastName, Rule::Required),
    (Field::Address, Rule::Required),
    (Field::Email, Rule::Required),
    (Field::Phone, Rule::Required),
    (Field::Email, Rule::EmailFormat),
    (Field::Phone, Rule::PhoneFormat),
];

/// Why a contact failed validation.
///
/// The `Display` text is the message the API returns; the client shows the
/// shorter per-field [`client_message`](Self::client_message) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty after trimming.
    #[error("All fields are required")]
    MissingField(Field),
    /// The email does not look like `name@domain.tld`.
    #[error("Invalid email format")]
    InvalidEmailFormat,
    /// The phone number does not have 4 to 15 digits without a leading zero.
    #[error("Invalid phone number format")]
    InvalidPhoneFormat,
}

impl ValidationError {
    /// The field at fault.
    #[must_use]
    pub const fn field(&self) -> Field {
        match self {
            Self::MissingField(field) => *field,
            Self::InvalidEmailFormat => Field::Email,
            Self::InvalidPhoneFormat => Field::Phone,
        }
    }

    /// Message shown next to the field in the client form.
    #[must_use]
    pub const fn client_message(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "This field is required",
            Self::InvalidEmailFormat => "Please enter a valid email address",
            Self::InvalidPhoneFormat => "Please enter a valid phone number",
        }
    }
}

/// A validation failure attached to its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub error: ValidationError,
}

impl FieldError {
    /// Message shown next to the field in the client form.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.error.client_message()
    }
}

/// Run [`RULES`] and return the first failure.
///
/// `value_of` must return trimmed values.
///
/// # Errors
///
/// Returns the first [`ValidationError`] in rule order.
pub fn first_failure<'a>(value_of: impl Fn(Field) -> &'a str) -> Result<(), ValidationError> {
    RULES
        .iter()
        .try_for_each(|&(field, rule)| rule.check(field, value_of(field)))
}

/// Run [`RULES`] and collect at most one failure per field.
///
/// Once a field has failed, later rules for that field are skipped, so an
/// empty email reports "required" and not also "invalid".
pub fn all_failures<'a>(value_of: impl Fn(Field) -> &'a str) -> Vec<FieldError> {
    let mut errors: Vec<FieldError> = Vec::new();
    for &(field, rule) in RULES {
        if errors.iter().any(|e| e.field == field) {
            continue;
        }
        if let Err(error) = rule.check(field, value_of(field)) {
            errors.push(FieldError { field, error });
        }
    }
    errors
}

/// Check a single field, as done when an input loses focus.
///
/// # Errors
///
/// Returns the first failing rule for `field`.
pub fn check_field(field: Field, value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    RULES
        .iter()
        .filter(|(f, _)| *f == field)
        .try_for_each(|&(_, rule)| rule.check(field, value))
}
