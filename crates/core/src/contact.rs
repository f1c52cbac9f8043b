//! The contact entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{ContactId, Email, Phone};
use crate::validation::{self, Field, FieldError, ValidationError};

/// A stored contact.
///
/// `id` and `created_at` are assigned by the store and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub email: Email,
    pub phone: Phone,
    pub created_at: DateTime<Utc>,
}

/// The user-supplied fields of a contact, as sent to create or update.
///
/// Missing and `null` fields deserialize to empty strings so they are
/// reported by validation rather than by the JSON parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInput {
    #[serde(deserialize_with = "nullable_string")]
    pub first_name: String,
    #[serde(deserialize_with = "nullable_string")]
    pub last_name: String,
    #[serde(deserialize_with = "nullable_string")]
    pub address: String,
    #[serde(deserialize_with = "nullable_string")]
    pub email: String,
    #[serde(deserialize_with = "nullable_string")]
    pub phone: String,
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ContactInput {
    /// The raw value of `field`.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Address => &self.address,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
        }
    }

    /// Mutable access to the value of `field`.
    pub fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Address => &mut self.address,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
        }
    }

    /// A copy with every field trimmed.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            address: self.address.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
        }
    }

    /// Validate and stop at the first failing rule.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] in rule order.
    pub fn validate(&self) -> Result<ValidContact, ValidationError> {
        let input = self.trimmed();
        validation::first_failure(|field| input.value(field))?;

        let email =
            Email::parse(&input.email).map_err(|_| ValidationError::InvalidEmailFormat)?;
        let phone =
            Phone::parse(&input.phone).map_err(|_| ValidationError::InvalidPhoneFormat)?;

        Ok(ValidContact {
            first_name: input.first_name,
            last_name: input.last_name,
            address: input.address,
            email,
            phone,
        })
    }

    /// Validate and collect at most one error per field.
    #[must_use]
    pub fn field_errors(&self) -> Vec<FieldError> {
        let input = self.trimmed();
        validation::all_failures(|field| input.value(field))
    }
}

impl From<&Contact> for ContactInput {
    fn from(contact: &Contact) -> Self {
        Self {
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            address: contact.address.clone(),
            email: contact.email.as_str().to_owned(),
            phone: contact.phone.as_str().to_owned(),
        }
    }
}

/// Contact fields that passed validation, trimmed and ready to persist.
///
/// Only [`ContactInput::validate`] constructs this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    first_name: String,
    last_name: String,
    address: String,
    email: Email,
    phone: Phone,
}

impl ValidContact {
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    #[must_use]
    pub const fn phone(&self) -> &Phone {
        &self.phone
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ann() -> ContactInput {
        ContactInput {
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            address: "1 Main St".into(),
            email: "ann@example.com".into(),
            phone: "+12025550123".into(),
        }
    }

    #[test]
    fn test_validate_trims_values() {
        let mut input = ann();
        input.first_name = "  Ann ".into();
        input.email = " ann@example.com\t".into();

        let valid = input.validate().unwrap();
        assert_eq!(valid.first_name(), "Ann");
        assert_eq!(valid.email().as_str(), "ann@example.com");
    }

    #[test]
    fn test_validate_whitespace_only_is_missing() {
        let mut input = ann();
        input.address = "   ".into();
        assert_eq!(
            input.validate(),
            Err(ValidationError::MissingField(Field::Address))
        );
    }

    #[test]
    fn test_validate_bad_phone() {
        let mut input = ann();
        input.phone = "not-a-phone".into();
        assert_eq!(input.validate(), Err(ValidationError::InvalidPhoneFormat));
    }

    #[test]
    fn test_deserialize_missing_and_null_fields() {
        let input: ContactInput =
            serde_json::from_str(r#"{"firstName":"Ann","lastName":null}"#).unwrap();
        assert_eq!(input.first_name, "Ann");
        assert_eq!(input.last_name, "");
        assert_eq!(input.phone, "");
        assert_eq!(
            input.validate(),
            Err(ValidationError::MissingField(Field::LastName))
        );
    }

    #[test]
    fn test_contact_json_uses_camel_case() {
        let contact = Contact {
            id: ContactId::new(1),
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            address: "1 Main St".into(),
            email: Email::parse("ann@example.com").unwrap(),
            phone: Phone::parse("+12025550123").unwrap(),
            created_at: DateTime::from_timestamp(0, 0).unwrap(),
        };
        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["firstName"], "Ann");
        assert_eq!(json["lastName"], "Lee");
        assert!(json.get("createdAt").is_some());

        let input = ContactInput::from(&contact);
        assert_eq!(input, ann());
    }
}
