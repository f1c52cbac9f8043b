//! Contact management over the REST API.
//!
//! These commands talk to a running server with `contact-book-client`. Input
//! is checked locally first, so obviously bad values never reach the server.

use contact_book_client::ContactsClient;
use contact_book_client::book::filter;
use contact_book_core::{Contact, ContactId, ContactInput, FieldError};
use thiserror::Error;

/// Errors raised before a request is sent.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Invalid contact ID: {0}")]
    InvalidId(String),

    #[error("{}", describe(.0))]
    Invalid(Vec<FieldError>),
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field.label(), e.message()))
        .collect::<Vec<_>>()
        .join("; ")
}

fn parse_id(raw: &str) -> Result<ContactId, InputError> {
    raw.parse()
        .map_err(|_| InputError::InvalidId(raw.to_string()))
}

fn checked(input: ContactInput) -> Result<ContactInput, InputError> {
    let input = input.trimmed();
    let errors = input.field_errors();
    if errors.is_empty() {
        Ok(input)
    } else {
        Err(InputError::Invalid(errors))
    }
}

fn format_contact(contact: &Contact) -> String {
    format!(
        "{:>4}  {} {}  <{}>  {}  {}",
        contact.id.as_i64(),
        contact.first_name, contact.last_name, contact.email, contact.phone, contact.address
    )
}

/// Print every contact matching `search`.
///
/// # Errors
///
/// Returns an error if the server cannot be reached or returns an error.
pub async fn list(server: &str, search: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let contacts = ContactsClient::new(server).list().await?;
    let visible = filter(&contacts, search.unwrap_or_default());

    #[allow(clippy::print_stdout)]
    {
        for contact in &visible {
            println!("{}", format_contact(contact));
        }
        println!("{} of {} contacts", visible.len(), contacts.len());
    }
    Ok(())
}

/// Create a contact.
///
/// # Errors
///
/// Returns an error if the input is invalid or the server rejects it.
pub async fn add(server: &str, input: ContactInput) -> Result<(), Box<dyn std::error::Error>> {
    let input = checked(input)?;
    let contact = ContactsClient::new(server).create(&input).await?;
    tracing::info!(contact_id = %contact.id, "Contact created");

    #[allow(clippy::print_stdout)]
    {
        println!("{}", format_contact(&contact));
    }
    Ok(())
}

/// Replace every field of a contact.
///
/// # Errors
///
/// Returns an error if the ID or input is invalid or the server rejects the
/// update.
pub async fn update(
    server: &str,
    id: &str,
    input: ContactInput,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = parse_id(id)?;
    let input = checked(input)?;
    let contact = ContactsClient::new(server).update(id, &input).await?;
    tracing::info!(contact_id = %contact.id, "Contact updated");

    #[allow(clippy::print_stdout)]
    {
        println!("{}", format_contact(&contact));
    }
    Ok(())
}

/// Delete a contact.
///
/// # Errors
///
/// Returns an error if the ID is invalid or the contact does not exist.
pub async fn delete(server: &str, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let id = parse_id(id)?;
    let message = ContactsClient::new(server).delete(id).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{message}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use contact_book_core::Field;

    use super::*;

    #[test]
    fn test_checked_trims_valid_input() {
        let input = ContactInput {
            first_name: " Ann ".into(),
            last_name: "Lee".into(),
            address: "1 Main St".into(),
            email: "ann@example.com".into(),
            phone: "(202) 555-0123".into(),
        };
        assert_eq!(checked(input).map(|i| i.first_name).ok().as_deref(), Some("Ann"));
    }

    #[test]
    fn test_checked_reports_every_field() {
        let Err(InputError::Invalid(errors)) = checked(ContactInput::default()) else {
            panic!("expected invalid input");
        };
        assert_eq!(errors.len(), Field::ALL.len());
    }

    #[test]
    fn test_parse_id_rejects_text() {
        assert!(matches!(parse_id("abc"), Err(InputError::InvalidId(_))));
        assert_eq!(parse_id("12").ok(), Some(ContactId::new(12)));
    }
}
