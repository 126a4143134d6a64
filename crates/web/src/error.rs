//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! rendering the error page. Route handlers return `Result<T, AppError>`.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::filters;
use crate::services::{AuthError, ServiceError};

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Owner/dog service failed.
    #[error("{0}")]
    Service(#[from] ServiceError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Session store read or write failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Bad request from client.
    #[error("{0}")]
    BadRequest(String),
}

/// Error page template.
///
/// Rendered without the session, so its nav does not depend on who is logged in.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub reason: &'static str,
    pub message: String,
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        Self::Service(err.into())
    }
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Service(ServiceError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Auth(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            Self::Auth(AuthError::UserAlreadyExists) => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Service(ServiceError::Repository(_))
            | Self::Auth(_)
            | Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the client.
    fn public_message(&self) -> String {
        match self {
            Self::Service(err @ ServiceError::NotFound { .. }) => err.to_string(),
            Self::Auth(AuthError::InvalidCredentials) => "Bad credentials".to_owned(),
            Self::Auth(AuthError::UserAlreadyExists) => {
                "An account with this email already exists".to_owned()
            }
            Self::BadRequest(msg) => msg.clone(),
            _ => "Something went wrong. Please try again later.".to_owned(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let page = ErrorTemplate {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error"),
            message: self.public_message(),
        };

        match page.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to render error page");
                (status, page.message).into_response()
            }
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context after a successful login.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context on logout.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::EntityKind;

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            AppError::from(ServiceError::NotFound {
                kind: EntityKind::Dog,
                id: Some(3)
            })
            .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::BadRequest("Invalid ID provided".to_owned()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(ServiceError::Repository(RepositoryError::NotFound)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(AuthError::PasswordHash).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_are_not_shown() {
        let err = AppError::from(ServiceError::Repository(RepositoryError::DataCorruption(
            "bad row 17".to_owned(),
        )));
        assert!(!err.public_message().contains("bad row"));
    }

    #[test]
    fn test_error_page_rendering() {
        let response = AppError::BadRequest("Invalid ID provided".to_owned()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_page_nav_does_not_offer_login() {
        let page = ErrorTemplate {
            status: 404,
            reason: "Not Found",
            message: "Dog with id 3 not found".to_owned(),
        };

        let body = page.render().unwrap();
        assert!(body.contains("Dog with id 3 not found"));
        assert!(!body.contains("href=\"/login\""));
        assert!(!body.contains("href=\"/register\""));
    }
}
