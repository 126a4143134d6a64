//! Core types for Pet City.
//!
//! This module provides type-safe wrappers for the domain's validated values.

pub mod age;
pub mod email;
pub mod id;
pub mod name;
pub mod phone;

pub use age::{DogAge, DogAgeError};
pub use email::{Email, EmailError};
pub use id::*;
pub use name::{DogName, NameError, PersonName};
pub use phone::{PhoneNumber, PhoneNumberError};
