//! Login and logout route handlers.
//!
//! Login checks the submitted email and password against the user store. The
//! page the visitor came from is remembered when the login page is shown and
//! used as the post-login destination.

use std::fmt;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::{HeaderMap, header::REFERER},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{
    OptionalAuth, clear_current_user, remember_redirect_url, set_current_user, take_redirect_url,
};
use crate::models::CurrentUser;
use crate::services::AuthError;
use crate::state::AppState;

/// Where a logged-in user lands when no page was remembered.
pub const DEFAULT_LANDING: &str = "/home";

// =============================================================================
// Form Types
// =============================================================================

/// Login form data. `username` is the account email.
#[derive(Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// `?error` and `?logout` flags on the login page.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
    pub logout: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate, Default)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub user: Option<CurrentUser>,
    pub error: bool,
    pub logged_out: bool,
}

// =============================================================================
// Routes
// =============================================================================

/// `GET /`: the login page, or `/home` for a logged-in user.
pub async fn root(OptionalAuth(user): OptionalAuth) -> Response {
    if user.is_some() {
        return Redirect::to(DEFAULT_LANDING).into_response();
    }
    LoginTemplate::default().into_response()
}

/// Display the login page, remembering the `Referer` for after login.
#[instrument(skip(state, session, headers, user))]
pub async fn login_page(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
    headers: HeaderMap,
    Query(query): Query<LoginQuery>,
) -> Result<Response> {
    if user.is_some() {
        return Ok(Redirect::to(DEFAULT_LANDING).into_response());
    }

    let referer = headers.get(REFERER).and_then(|v| v.to_str().ok());
    remember_redirect_url(&session, referer, &state.config().base_url).await?;

    Ok(LoginTemplate {
        user: None,
        error: query.error.is_some(),
        logged_out: query.logout.is_some(),
    }
    .into_response())
}

/// Handle login form submission.
///
/// Unknown email and wrong password both end at `/login?error`.
#[instrument(skip(state, session, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let user = match state
        .auth()
        .authenticate(&form.username, &form.password)
        .await
    {
        Ok(user) => user,
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("Login failed: bad credentials");
            return Ok(Redirect::to("/login?error").into_response());
        }
        Err(e) => return Err(e.into()),
    };

    let target = take_redirect_url(&session).await?;
    set_current_user(&session, &CurrentUser::from(&user)).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Redirect::to(target.as_deref().unwrap_or(DEFAULT_LANDING)).into_response())
}

/// End the session and return to the login page.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    Ok(Redirect::to("/login?logout"))
}
