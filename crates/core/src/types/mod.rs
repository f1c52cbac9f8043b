//! Core types for Contact Book.
//!
//! This module provides type-safe wrappers for contact fields that carry
//! format rules of their own.

pub mod email;
pub mod id;
pub mod phone;

pub use email::{Email, EmailError};
pub use id::*;
pub use phone::{Phone, PhoneError};
