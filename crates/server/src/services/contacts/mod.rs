//! Contact service.
//!
//! Every write validates the whole input before touching storage, so a
//! rejected request never leaves a partial change behind.

mod error;

pub use error::ContactError;

use sqlx::SqlitePool;

use contact_book_core::{Contact, ContactId, ContactInput};

use crate::db::ContactRepository;

/// Contact service.
///
/// Handles listing, lookup, creation, update and deletion of contacts.
pub struct ContactService<'a> {
    contacts: ContactRepository<'a>,
}

impl<'a> ContactService<'a> {
    /// Create a new contact service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            contacts: ContactRepository::new(pool),
        }
    }

    /// All contacts ordered by first name, then last name.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::Storage` if the query fails.
    pub async fn list(&self) -> Result<Vec<Contact>, ContactError> {
        Ok(self.contacts.list().await?)
    }

    /// A single contact.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::NotFound` if no contact has this ID.
    /// Returns `ContactError::Storage` if the query fails.
    pub async fn get(&self, id: ContactId) -> Result<Contact, ContactError> {
        self.contacts
            .get_by_id(id)
            .await?
            .ok_or(ContactError::NotFound)
    }

    /// Validate and store a new contact.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::Validation` if a field is missing or malformed.
    /// Returns `ContactError::DuplicateEmail` if the email is already in use.
    /// Returns `ContactError::Storage` for other database errors.
    pub async fn create(&self, input: &ContactInput) -> Result<Contact, ContactError> {
        let valid = input.validate()?;
        let contact = self.contacts.create(&valid).await?;

        tracing::info!(contact_id = %contact.id, "Contact created");
        Ok(contact)
    }

    /// Validate and overwrite an existing contact.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::Validation` if a field is missing or malformed.
    /// Returns `ContactError::DuplicateEmail` if another contact uses the email.
    /// Returns `ContactError::NotFound` if no contact has this ID.
    /// Returns `ContactError::Storage` for other database errors.
    pub async fn update(
        &self,
        id: ContactId,
        input: &ContactInput,
    ) -> Result<Contact, ContactError> {
        let valid = input.validate()?;
        let contact = self.contacts.update(id, &valid).await?;

        tracing::info!(contact_id = %contact.id, "Contact updated");
        Ok(contact)
    }

    /// Delete a contact.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::NotFound` if no contact has this ID.
    /// Returns `ContactError::Storage` if the query fails.
    pub async fn delete(&self, id: ContactId) -> Result<(), ContactError> {
        self.contacts.delete(id).await?;

        tracing::info!(contact_id = %id, "Contact deleted");
        Ok(())
    }
}
