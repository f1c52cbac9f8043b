//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, AppError>`.
//!
//! Every error response has the JSON body `{ "error": "<message>" }`, plus a
//! `field` key when a single input field is at fault.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use contact_book_core::Field;

use crate::services::ContactError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Contact operation failed.
    #[error(transparent)]
    Contact(#[from] ContactError),

    /// Bad request from client.
    #[error("{0}")]
    BadRequest(String),
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<Field>,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Contact(err) => match err {
                ContactError::Validation(_) | ContactError::DuplicateEmail => {
                    StatusCode::BAD_REQUEST
                }
                ContactError::NotFound => StatusCode::NOT_FOUND,
                ContactError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// The input field at fault, if any.
    #[must_use]
    pub const fn field(&self) -> Option<Field> {
        match self {
            Self::Contact(ContactError::Validation(err)) => Some(err.field()),
            Self::Contact(ContactError::DuplicateEmail) => Some(Field::Email),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = ErrorBody {
            error: self.to_string(),
            field: self.field(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
