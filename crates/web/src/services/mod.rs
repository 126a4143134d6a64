//! Business logic services.
//!
//! Services are cheap per-request structs borrowing the stores held in
//! [`AppState`](crate::state::AppState):
//!
//! ```rust,ignore
//! let owner = PetOwnerService::new(state.owners()).get_by_id(id).await?;
//! ```

pub mod auth;
pub mod dogs;
pub mod error;
pub mod owners;
pub mod validation;

pub use auth::{AuthError, AuthService};
pub use dogs::DogService;
pub use error::{EntityKind, ServiceError};
pub use owners::PetOwnerService;
pub use validation::{DogForm, FieldErrors, PetOwnerForm, RegistrationForm, RegistrationValidator};
