//! Business logic services for the contacts API.
//!
//! # Services
//!
//! - `contacts` - Validation, uniqueness and persistence of contacts

pub mod contacts;

pub use contacts::{ContactError, ContactService};
