//! Registration route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use pet_city_core::Email;

use super::auth::DEFAULT_LANDING;
use crate::error::{Result, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, set_current_user};
use crate::models::CurrentUser;
use crate::services::{AuthError, FieldErrors, RegistrationForm, RegistrationValidator};
use crate::state::AppState;

/// Registration page template.
#[derive(Template, WebTemplate, Default)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub user: Option<CurrentUser>,
    /// Submitted email, kept on re-render. Passwords never are.
    pub email: String,
    pub errors: FieldErrors,
}

fn rejected(email: String, errors: FieldErrors) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        RegisterTemplate {
            user: None,
            email,
            errors,
        },
    )
        .into_response()
}

/// Display the registration page.
pub async fn register_page(OptionalAuth(user): OptionalAuth) -> RegisterTemplate {
    RegisterTemplate {
        user,
        ..RegisterTemplate::default()
    }
}

/// Handle registration form submission.
///
/// Validation failures re-render the form with status 422. On success the new
/// user is logged in and sent to the landing page.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegistrationForm>,
) -> Result<Response> {
    let auth = state.auth();
    let mut errors = RegistrationValidator::new(&auth).validate(&form).await?;
    if !errors.is_empty() {
        tracing::info!(fields = errors.iter().count(), "Registration rejected");
        return Ok(rejected(form.email, errors));
    }

    let email = match Email::parse(form.email.trim()) {
        Ok(email) => email,
        Err(e) => {
            errors.reject("email", "format", e.to_string());
            return Ok(rejected(form.email, errors));
        }
    };

    let user = match auth.register(&email, &form.password).await {
        Ok(user) => user,
        // Lost a race with another registration for the same email.
        Err(AuthError::UserAlreadyExists) => {
            errors.reject("email", "duplicate", "Someone already has that email");
            return Ok(rejected(form.email, errors));
        }
        Err(e) => return Err(e.into()),
    };

    set_current_user(&session, &CurrentUser::from(&user)).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, "User registered and logged in");

    Ok(Redirect::to(DEFAULT_LANDING).into_response())
}
