//! Domain models for the web application.
//!
//! These are validated domain objects, separate from database row types.

pub mod dog;
pub mod owner;
pub mod session;
pub mod user;

pub use dog::{Dog, NewDog};
pub use owner::{NewPetOwner, PetOwner};
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
