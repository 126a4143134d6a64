//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                      - Login page, or redirect to /home
//! GET  /login                                 - Login page (remembers Referer)
//! POST /login                                 - Login action
//! GET  /register                              - Registration page
//! POST /register                              - Register and log in
//! GET|POST /logout                            - Logout action
//! GET  /home                                  - Landing page
//!
//! # Owners (auth, except POST /owners/insert)
//! GET  /owners/list                           - Owner listing
//! GET  /owners/insert                         - New owner form
//! POST /owners/insert                         - Create owner
//! GET  /owners/{owner_id}                     - Owner detail
//! GET  /owners/update/{owner_id}              - Edit owner form
//! POST /owners/update/{owner_id}              - Update owner
//! GET  /owners/delete/{owner_id}              - Delete owner and their dogs
//!
//! # Dogs (auth)
//! GET  /owners/{owner_id}/dogs                - An owner's dogs
//! GET  /owners/{owner_id}/dogs/create         - New dog form
//! POST /owners/{owner_id}/dogs/create         - Create dog
//! GET  /owners/{owner_id}/dogs/delete/{dog_id} - Delete dog
//! GET  /dogs/{dog_id}                         - Dog detail
//! GET  /dogs/{dog_id}/update                  - Edit dog form
//! POST /dogs/{dog_id}/update                  - Update dog
//! ```

pub mod auth;
pub mod dogs;
pub mod home;
pub mod owners;
pub mod register;

use axum::{
    Router,
    extract::{FromRequestParts, Path},
    http::request::Parts,
    routing::get,
};
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Message shown for ids that can never exist.
pub const INVALID_ID: &str = "Invalid ID provided";

/// Path extractor for numeric ids.
///
/// Wraps [`Path`] so a malformed or out-of-range id renders the error page
/// with [`INVALID_ID`] instead of a plain-text rejection.
pub struct IdPath<T>(pub T);

impl<S, T> FromRequestParts<S> for IdPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::info!(error = %rejection.body_text(), "Rejected malformed id");
                Err(AppError::BadRequest(INVALID_ID.to_owned()))
            }
        }
    }
}

/// Reject ids that can never exist.
pub(crate) fn require_positive_id(id: i32) -> Result<i32> {
    if id > 0 {
        Ok(id)
    } else {
        tracing::info!(id, "Rejected non-positive id");
        Err(AppError::BadRequest(INVALID_ID.to_owned()))
    }
}

/// Create the owner routes router, including the per-owner dog routes.
pub fn owner_routes() -> Router<AppState> {
    Router::new()
        .route("/list", get(owners::list))
        .route("/insert", get(owners::insert_page).post(owners::insert))
        .route("/{owner_id}", get(owners::show))
        .route(
            "/update/{owner_id}",
            get(owners::update_page).post(owners::update),
        )
        .route("/delete/{owner_id}", get(owners::delete))
        .route("/{owner_id}/dogs", get(dogs::owner_dogs))
        .route(
            "/{owner_id}/dogs/create",
            get(dogs::create_page).post(dogs::create),
        )
        .route("/{owner_id}/dogs/delete/{dog_id}", get(dogs::delete))
}

/// Create the dog routes router.
pub fn dog_routes() -> Router<AppState> {
    Router::new()
        .route("/{dog_id}", get(dogs::show))
        .route("/{dog_id}/update", get(dogs::update_page).post(dogs::update))
}

/// Create all page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(auth::root))
        .route("/login", get(auth::login_page).post(auth::login))
        .route(
            "/register",
            get(register::register_page).post(register::register),
        )
        .route("/logout", get(auth::logout).post(auth::logout))
        .route("/home", get(home::home))
        .nest("/owners", owner_routes())
        .nest("/dogs", dog_routes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive_id() {
        assert!(matches!(require_positive_id(4), Ok(4)));
        assert!(matches!(require_positive_id(0), Err(AppError::BadRequest(_))));
        assert!(matches!(require_positive_id(-3), Err(AppError::BadRequest(_))));
    }
}
