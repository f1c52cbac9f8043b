//! Contact Book Core - Shared types and validation.
//!
//! This crate provides the pieces shared by every Contact Book component:
//! - `server` - REST API over the contacts table
//! - `client` - API client and presentation state
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. The validation rule table lives here so the server
//! and the client check contacts the same way.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for contact IDs, emails and phone numbers
//! - [`contact`] - The `Contact` entity and its input form
//! - [`validation`] - Ordered rule table and validation errors

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod contact;
pub mod types;
pub mod validation;

pub use contact::{Contact, ContactInput, ValidContact};
pub use types::*;
pub use validation::{Field, FieldError, RULES, Rule, ValidationError};
