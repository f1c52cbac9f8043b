//! Contact operation error types.

use thiserror::Error;

use contact_book_core::ValidationError;

use crate::db::RepositoryError;

/// Errors that can occur during contact operations.
///
/// Everything except `Storage` is detected before any row is written.
#[derive(Debug, Error)]
pub enum ContactError {
    /// A field is missing or malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Another contact already uses the email address.
    #[error("Email already exists")]
    DuplicateEmail,

    /// No contact has the requested ID.
    #[error("Contact not found")]
    NotFound,

    /// Unexpected storage failure.
    #[error("{0}")]
    Storage(RepositoryError),
}

impl From<RepositoryError> for ContactError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateEmail => Self::DuplicateEmail,
            RepositoryError::NotFound => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}
