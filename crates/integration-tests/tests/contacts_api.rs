//! REST API behavior over real HTTP.

#![allow(clippy::unwrap_used)]

use contact_book_core::{ContactId, Field};
use contact_book_integration_tests::{TestServer, contact_input};
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_create_duplicate_update_delete_sequence() {
    let server = TestServer::start().await.unwrap();
    let api = server.client();

    let ann = contact_input("Ann", "Lee", "ann");
    let created = api.create(&ann).await.unwrap();
    assert_eq!(created.id, ContactId::new(1));

    let err = api.create(&ann).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Email already exists");
    assert_eq!(server.contact_count().await.unwrap(), 1);

    let mut bad_phone = ann.clone();
    bad_phone.phone = "not-a-phone".to_string();
    let err = api.update(created.id, &bad_phone).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid phone number format");
    assert!(matches!(
        err,
        contact_book_client::ClientError::Api {
            field: Some(Field::Phone),
            ..
        }
    ));

    let ack = api.delete(created.id).await.unwrap();
    assert_eq!(ack, "Contact deleted successfully");

    let err = api.get(created.id).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Contact not found");
}

#[tokio::test]
async fn test_get_after_create_returns_same_record() {
    let server = TestServer::start().await.unwrap();
    let api = server.client();

    let created = api.create(&contact_input("Bo", "Diaz", "bo")).await.unwrap();
    let fetched = api.get(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_list_sorted_by_first_then_last_name() {
    let server = TestServer::start().await.unwrap();
    let api = server.client();

    for (first, last, tag) in [
        ("cara", "Ng", "cara"),
        ("Bob", "Young", "bob-y"),
        ("Bob", "Adams", "bob-a"),
        ("Ann", "Lee", "ann"),
    ] {
        api.create(&contact_input(first, last, tag)).await.unwrap();
    }

    let names: Vec<String> = api
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|c| format!("{} {}", c.first_name, c.last_name))
        .collect();
    // Binary collation puts lowercase after uppercase.
    assert_eq!(names, vec!["Ann Lee", "Bob Adams", "Bob Young", "cara Ng"]);
}

#[tokio::test]
async fn test_update_to_other_contacts_email_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let api = server.client();

    let ann = api.create(&contact_input("Ann", "Lee", "ann")).await.unwrap();
    let bob = api.create(&contact_input("Bob", "Ray", "bob")).await.unwrap();

    let mut steal = contact_input("Bob", "Ray", "ann");
    let err = api.update(bob.id, &steal).await.unwrap_err();
    assert_eq!(err.to_string(), "Email already exists");

    steal.email = ann.email.to_string();
    steal.first_name = "Annie".to_string();
    let updated = api.update(ann.id, &steal).await.unwrap();
    assert_eq!(updated.first_name, "Annie");
    assert_eq!(updated.created_at, ann.created_at);
}

#[tokio::test]
async fn test_raw_http_error_shapes() {
    let server = TestServer::start().await.unwrap();
    let http = reqwest::Client::new();
    let base = server.base_url();

    let response = http
        .post(format!("{base}/contacts"))
        .header("content-type", "application/json")
        .body("{\"firstName\":")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());

    let response = http
        .post(format!("{base}/contacts"))
        .json(&json!({ "firstName": "Ann", "lastName": null }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "All fields are required");
    assert_eq!(body["field"], "lastName");

    let response = http
        .delete(format!("{base}/contacts/not-a-number"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = http.get(format!("{base}/health/ready")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_values_are_stored_trimmed() {
    let server = TestServer::start().await.unwrap();
    let api = server.client();

    let mut input = contact_input("  Ann ", "Lee", "ann");
    input.address = " 1 Main St\t".to_string();
    let created = api.create(&input).await.unwrap();
    assert_eq!(created.first_name, "Ann");
    assert_eq!(created.address, "1 Main St");
}
