//! Contact API route handlers.
//!
//! Thin wrappers around [`ContactService`]: extract, delegate, wrap in JSON.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Serialize;
use tracing::instrument;

use contact_book_core::{Contact, ContactId, ContactInput};

use crate::error::{AppError, Result};
use crate::services::{ContactError, ContactService};
use crate::state::AppState;

/// Acknowledgement returned after a delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

/// Parse the `{id}` path segment.
///
/// A segment that is not an integer cannot name a contact, so it is reported
/// as not found rather than as a malformed request.
fn parse_id(raw: &str) -> Result<ContactId> {
    raw.parse::<ContactId>()
        .map_err(|_| AppError::from(ContactError::NotFound))
}

/// Unwrap a JSON body, turning parse failures into a JSON 400.
fn json_body(body: std::result::Result<Json<ContactInput>, JsonRejection>) -> Result<ContactInput> {
    body.map(|Json(input)| input)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// List all contacts.
///
/// GET /contacts
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Contact>>> {
    let contacts = ContactService::new(state.pool()).list().await?;
    Ok(Json(contacts))
}

/// Get one contact.
///
/// GET /contacts/{id}
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Contact>> {
    let id = parse_id(&id)?;
    let contact = ContactService::new(state.pool()).get(id).await?;
    Ok(Json(contact))
}

/// Create a contact.
///
/// POST /contacts
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<ContactInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Contact>)> {
    let input = json_body(body)?;
    let contact = ContactService::new(state.pool()).create(&input).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

/// Replace the fields of a contact.
///
/// PUT /contacts/{id}
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: std::result::Result<Json<ContactInput>, JsonRejection>,
) -> Result<Json<Contact>> {
    let id = parse_id(&id)?;
    let input = json_body(body)?;
    let contact = ContactService::new(state.pool()).update(id, &input).await?;
    Ok(Json(contact))
}

/// Delete a contact.
///
/// DELETE /contacts/{id}
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id = parse_id(&id)?;
    ContactService::new(state.pool()).delete(id).await?;
    Ok(Json(DeleteResponse {
        message: "Contact deleted successfully",
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Method, Request, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::db::create_in_memory_pool;
    use crate::routes;

    async fn app() -> Router {
        let pool = create_in_memory_pool().await.unwrap();
        routes::router(AppState::new(pool))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn ann() -> Value {
        json!({
            "firstName": "Ann",
            "lastName": "Lee",
            "address": "1 Main St",
            "email": "ann@example.com",
            "phone": "+12025550123"
        })
    }

    #[tokio::test]
    async fn test_contact_lifecycle() {
        let app = app().await;

        let (status, created) = send(&app, Method::POST, "/contacts", Some(ann())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 1);
        assert_eq!(created["firstName"], "Ann");
        assert!(created["createdAt"].is_string());

        let (status, body) = send(&app, Method::POST, "/contacts", Some(ann())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Email already exists");

        let mut bad_phone = ann();
        bad_phone["phone"] = json!("not-a-phone");
        let (status, body) = send(&app, Method::PUT, "/contacts/1", Some(bad_phone)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid phone number format");
        assert_eq!(body["field"], "phone");

        let (status, body) = send(&app, Method::DELETE, "/contacts/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Contact deleted successfully");

        let (status, body) = send(&app, Method::GET, "/contacts/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Contact not found");
    }

    #[tokio::test]
    async fn test_get_returns_created_record() {
        let app = app().await;

        let (_, created) = send(&app, Method::POST, "/contacts", Some(ann())).await;
        let (status, fetched) = send(&app, Method::GET, "/contacts/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let app = app().await;
        let (_, created) = send(&app, Method::POST, "/contacts", Some(ann())).await;

        let mut changed = ann();
        changed["address"] = json!("2 Side Rd");
        let (status, updated) = send(&app, Method::PUT, "/contacts/1", Some(changed)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["address"], "2 Side Rd");
        assert_eq!(updated["id"], created["id"]);
        assert_eq!(updated["createdAt"], created["createdAt"]);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let app = app().await;

        let (status, _) = send(&app, Method::PUT, "/contacts/9", Some(ann())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, Method::DELETE, "/contacts/9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Contact not found");
    }

    #[tokio::test]
    async fn test_missing_field() {
        let app = app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/contacts",
            Some(json!({ "firstName": "Ann", "lastName": "Lee" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "All fields are required");
        assert_eq!(body["field"], "address");

        let (_, list) = send(&app, Method::GET, "/contacts", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_invalid_email() {
        let app = app().await;
        let mut input = ann();
        input["email"] = json!("ann@example");
        let (status, body) = send(&app, Method::POST, "/contacts", Some(input)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid email format");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = app().await;
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/contacts")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_not_found() {
        let app = app().await;
        let (status, body) = send(&app, Method::GET, "/contacts/abc", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Contact not found");
    }

    #[tokio::test]
    async fn test_list_is_sorted() {
        let app = app().await;
        for (first, last, email) in [
            ("Cat", "Ng", "cat@example.com"),
            ("Ann", "Zed", "ann.z@example.com"),
            ("Ann", "Abe", "ann.a@example.com"),
        ] {
            let mut input = ann();
            input["firstName"] = json!(first);
            input["lastName"] = json!(last);
            input["email"] = json!(email);
            let (status, _) = send(&app, Method::POST, "/contacts", Some(input)).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, list) = send(&app, Method::GET, "/contacts", None).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<String> = list
            .as_array()
            .unwrap()
            .iter()
            .map(|c| format!("{} {}", c["firstName"], c["lastName"]).replace('"', ""))
            .collect();
        assert_eq!(names, vec!["Ann Abe", "Ann Zed", "Cat Ng"]);
    }
}
