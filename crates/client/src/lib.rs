//! Contact Book client.
//!
//! Everything the contact list UI needs apart from the widgets themselves:
//!
//! - [`api`] - Typed HTTP client for the contacts REST API
//! - [`book`] - The cached contact list, local search and edit mode
//! - [`form`] - Form values with per-field validation errors
//! - [`view`] - Askama-rendered contact card markup
//! - [`app`] - Ties the pieces together the way the page does
//!
//! Validation uses the same rule table as the server, from
//! `contact-book-core`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod app;
pub mod book;
pub mod form;
pub mod view;

pub use api::{ClientError, ContactsClient};
pub use app::{ContactApp, Flash, FlashKind, SubmitOutcome};
pub use book::{ContactBook, Submission};
pub use form::ContactForm;
