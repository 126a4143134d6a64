//! Pet City Core - Shared domain types.
//!
//! This crate provides the validated types used across all Pet City components:
//! - `web` - The record management site (owners, dogs, accounts)
//! - `cli` - Command-line tools for migrations, users and seed data
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP. Parsing a value into one of these types is the validation step;
//! anything holding an `Email` or a `DogAge` has already passed the checks.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, phone numbers, names and ages

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
