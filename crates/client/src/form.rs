//! Contact form state.
//!
//! Holds what the user typed and the error currently shown under each field.
//! A field shows at most one error.

use contact_book_core::validation::check_field;
use contact_book_core::{ContactInput, Field, FieldError};

/// Values and field errors of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    values: ContactInput,
    errors: Vec<FieldError>,
}

impl ContactForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn values(&self) -> &ContactInput {
        &self.values
    }

    /// Error shown under `field`, if any.
    #[must_use]
    pub fn error(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// The user typed into `field`: store the value and clear its error.
    pub fn input(&mut self, field: Field, value: &str) {
        value.clone_into(self.values.value_mut(field));
        self.errors.retain(|e| e.field != field);
    }

    /// `field` lost focus: check it on its own.
    ///
    /// Returns `true` if the field is valid.
    pub fn blur(&mut self, field: Field) -> bool {
        self.errors.retain(|e| e.field != field);
        match check_field(field, self.values.value(field)) {
            Ok(()) => true,
            Err(error) => {
                self.errors.push(FieldError { field, error });
                false
            }
        }
    }

    /// Check every field and show all errors at once.
    ///
    /// Returns `true` if the form is valid.
    pub fn validate(&mut self) -> bool {
        self.errors = self.values.field_errors();
        self.errors.is_empty()
    }

    /// Show errors computed elsewhere.
    pub fn set_errors(&mut self, errors: Vec<FieldError>) {
        self.errors = errors;
    }

    /// Fill the form from an existing contact, clearing errors.
    pub fn load(&mut self, values: ContactInput) {
        self.values = values;
        self.errors.clear();
    }

    /// Empty every field and clear errors.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use contact_book_core::ValidationError;

    use super::*;

    #[test]
    fn test_blur_reports_single_field() {
        let mut form = ContactForm::new();
        form.input(Field::Phone, "0000");

        assert!(!form.blur(Field::Phone));
        assert_eq!(
            form.error(Field::Phone).map(FieldError::message),
            Some("Please enter a valid phone number")
        );
        assert!(form.error(Field::Email).is_none());
    }

    #[test]
    fn test_input_clears_field_error() {
        let mut form = ContactForm::new();
        assert!(!form.blur(Field::Email));
        assert_eq!(
            form.error(Field::Email).map(|e| e.error),
            Some(ValidationError::MissingField(Field::Email))
        );

        form.input(Field::Email, "ann@example.com");
        assert!(form.error(Field::Email).is_none());
        assert!(form.blur(Field::Email));
    }

    #[test]
    fn test_validate_shows_all_errors() {
        let mut form = ContactForm::new();
        form.input(Field::FirstName, "Ann");
        form.input(Field::Email, "nope");

        assert!(!form.validate());
        let fields: Vec<Field> = form.errors().iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![Field::LastName, Field::Address, Field::Phone, Field::Email]
        );
    }

    #[test]
    fn test_reset_clears_values_and_errors() {
        let mut form = ContactForm::new();
        form.input(Field::Address, "1 Main St");
        form.validate();

        form.reset();
        assert_eq!(form, ContactForm::new());
    }
}
