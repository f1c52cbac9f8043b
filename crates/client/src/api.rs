//! Contacts REST API client.
//!
//! One method per endpoint. Non-2xx responses become [`ClientError::Api`]
//! carrying the server's `error` message. Nothing is retried.

use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

use contact_book_core::{Contact, ContactId, ContactInput, Field};

/// Message shown when an error response has no usable `error` field.
pub const FALLBACK_ERROR: &str = "Something went wrong";

/// Errors that can occur when calling the contacts API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with an error status.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The server's `error` message.
        message: String,
        /// The input field at fault, if the server named one.
        field: Option<Field>,
    },

    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    /// HTTP status code of an API error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(_) => None,
        }
    }

    /// Whether the server reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    field: Option<Field>,
}

/// Delete acknowledgement returned by the server.
#[derive(Debug, Deserialize)]
struct DeleteBody {
    message: String,
}

/// Client for the contacts REST API.
#[derive(Debug, Clone)]
pub struct ContactsClient {
    /// HTTP client.
    client: Client,
    /// Server base URL without trailing slash, e.g. `http://127.0.0.1:3000`.
    base_url: String,
}

impl ContactsClient {
    /// Create a new client for the server at `base_url`.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The server base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn contacts_url(&self) -> String {
        format!("{}/contacts", self.base_url)
    }

    fn contact_url(&self, id: ContactId) -> String {
        format!("{}/contacts/{id}", self.base_url)
    }

    /// Fetch every contact, sorted by the server.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the server returns an error.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Contact>, ClientError> {
        let response = self.client.get(self.contacts_url()).send().await?;
        let contacts: Vec<Contact> = read_json(response).await?;
        debug!(count = contacts.len(), "Contacts loaded");
        Ok(contacts)
    }

    /// Fetch one contact.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the server returns an error.
    #[instrument(skip(self))]
    pub async fn get(&self, id: ContactId) -> Result<Contact, ClientError> {
        let response = self.client.get(self.contact_url(id)).send().await?;
        read_json(response).await
    }

    /// Create a contact.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the server rejects the contact.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: &ContactInput) -> Result<Contact, ClientError> {
        let response = self
            .client
            .post(self.contacts_url())
            .json(input)
            .send()
            .await?;
        read_json(response).await
    }

    /// Replace the fields of a contact.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the server rejects the update.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: ContactId, input: &ContactInput) -> Result<Contact, ClientError> {
        let response = self
            .client
            .put(self.contact_url(id))
            .json(input)
            .send()
            .await?;
        read_json(response).await
    }

    /// Delete a contact and return the server's acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the server returns an error.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ContactId) -> Result<String, ClientError> {
        let response = self.client.delete(self.contact_url(id)).send().await?;
        let body: DeleteBody = read_json(response).await?;
        Ok(body.message)
    }
}

/// Decode a success body, or turn an error status into [`ClientError::Api`].
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.json::<ErrorBody>().await.ok();
    let (message, field) = body.map_or((None, None), |b| (b.error, b.field));
    let message = message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_ERROR.to_string());

    debug!(status = status.as_u16(), error = %message, "API request failed");

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
        field,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ContactsClient::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(
            client.contact_url(ContactId::new(4)),
            "http://localhost:3000/contacts/4"
        );
    }

    #[test]
    fn test_api_error_display_is_server_message() {
        let err = ClientError::Api {
            status: 400,
            message: "Email already exists".to_string(),
            field: Some(Field::Email),
        };
        assert_eq!(err.to_string(), "Email already exists");
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_not_found());
    }
}
