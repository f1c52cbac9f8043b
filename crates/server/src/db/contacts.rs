//! Contact repository for database operations.
//!
//! Queries are built at runtime with `sqlx::query_as` and decoded through
//! [`ContactRow`], so the crate builds without a live database.
//!
//! Email uniqueness is enforced by the `UNIQUE` constraint on the table. The
//! lookups done before each write only exist to fail early with
//! [`RepositoryError::DuplicateEmail`]; a writer that slips in between the
//! lookup and the write is caught by the constraint and reported the same way.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use contact_book_core::{Contact, ContactId, Email, Phone, ValidContact};

use super::{RepositoryError, map_unique_violation};

/// A row of the `contacts` table.
#[derive(Debug, sqlx::FromRow)]
#[sqlx(rename_all = "camelCase")]
struct ContactRow {
    id: ContactId,
    first_name: String,
    last_name: String,
    address: String,
    email: String,
    phone: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ContactRow> for Contact {
    type Error = RepositoryError;

    fn try_from(row: ContactRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email for contact {}: {e}", row.id))
        })?;
        let phone = Phone::parse(&row.phone).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid phone for contact {}: {e}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            address: row.address,
            email,
            phone,
            created_at: row.created_at,
        })
    }
}

/// Repository for contact database operations.
pub struct ContactRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ContactRepository<'a> {
    /// Create a new contact repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every contact ordered by first name, then last name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list(&self) -> Result<Vec<Contact>, RepositoryError> {
        let rows = sqlx::query_as::<_, ContactRow>(
            r"
            SELECT id, firstName, lastName, address, email, phone, createdAt
            FROM contacts
            ORDER BY firstName, lastName
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Contact::try_from).collect()
    }

    /// Get a contact by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn get_by_id(&self, id: ContactId) -> Result<Option<Contact>, RepositoryError> {
        let row = sqlx::query_as::<_, ContactRow>(
            r"
            SELECT id, firstName, lastName, address, email, phone, createdAt
            FROM contacts
            WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Contact::try_from).transpose()
    }

    /// Count stored contacts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contacts")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Whether a contact other than `excluding` uses `email`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn email_exists(
        &self,
        email: &Email,
        excluding: Option<ContactId>,
    ) -> Result<bool, RepositoryError> {
        let found = sqlx::query_scalar::<_, ContactId>(
            r"
            SELECT id FROM contacts
            WHERE email = ? AND (? IS NULL OR id != ?)
            LIMIT 1
            ",
        )
        .bind(email.as_str())
        .bind(excluding)
        .bind(excluding)
        .fetch_optional(self.pool)
        .await?;

        Ok(found.is_some())
    }

    /// Create a new contact.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DuplicateEmail` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, contact: &ValidContact) -> Result<Contact, RepositoryError> {
        if self.email_exists(contact.email(), None).await? {
            return Err(RepositoryError::DuplicateEmail);
        }

        let row = sqlx::query_as::<_, ContactRow>(
            r"
            INSERT INTO contacts (firstName, lastName, address, email, phone, createdAt)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, firstName, lastName, address, email, phone, createdAt
            ",
        )
        .bind(contact.first_name())
        .bind(contact.last_name())
        .bind(contact.address())
        .bind(contact.email().as_str())
        .bind(contact.phone().as_str())
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(map_unique_violation)?;

        Contact::try_from(row)
    }

    /// Overwrite the five user fields of an existing contact.
    ///
    /// `id` and `createdAt` are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DuplicateEmail` if another contact uses the email.
    /// Returns `RepositoryError::NotFound` if the contact doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ContactId,
        contact: &ValidContact,
    ) -> Result<Contact, RepositoryError> {
        if self.email_exists(contact.email(), Some(id)).await? {
            return Err(RepositoryError::DuplicateEmail);
        }

        let row = sqlx::query_as::<_, ContactRow>(
            r"
            UPDATE contacts
            SET firstName = ?, lastName = ?, address = ?, email = ?, phone = ?
            WHERE id = ?
            RETURNING id, firstName, lastName, address, email, phone, createdAt
            ",
        )
        .bind(contact.first_name())
        .bind(contact.last_name())
        .bind(contact.address())
        .bind(contact.email().as_str())
        .bind(contact.phone().as_str())
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(map_unique_violation)?;

        row.map_or(Err(RepositoryError::NotFound), Contact::try_from)
    }

    /// Delete a contact by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the contact doesn't exist.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ContactId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
