//! Authentication middleware and extractors.
//!
//! Provides extractors for requiring a logged-in user in route handlers, plus
//! the session helpers used by the login flow.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use url::Url;

use crate::models::{CurrentUser, session_keys};

/// Paths that are never remembered as a post-login destination.
const AUTH_PATHS: [&str; 3] = ["/login", "/register", "/logout"];

/// Extractor that requires a logged-in user.
///
/// If nobody is logged in, returns a redirect to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Error returned when authentication is required but nobody is logged in.
#[derive(Debug)]
pub enum AuthRejection {
    /// Redirect to the login page.
    RedirectToLogin,
    /// The session layer is missing from the stack.
    MissingSession,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::MissingSession => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::MissingSession)?;

        let user: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or(AuthRejection::RedirectToLogin)?;

        Ok(Self(user))
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireAuth`, this does not reject the request if nobody is logged in.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentUser>(session_keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Store the logged-in user, rotating the session id first.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_USER, user).await
}

/// End the session entirely (logout).
///
/// # Errors
///
/// Returns an error if the session store cannot delete the record.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

/// Remember where to send the user after login, replacing any earlier value.
///
/// A missing or foreign `referer` clears the remembered URL. A referer from
/// the auth pages themselves (e.g. the `/login?error` round-trip) leaves it
/// untouched.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn remember_redirect_url(
    session: &Session,
    referer: Option<&str>,
    base_url: &Url,
) -> Result<(), tower_sessions::session::Error> {
    match referer.map_or(Referer::Foreign, |r| classify_referer(r, base_url)) {
        Referer::Page(target) => session.insert(session_keys::REDIRECT_URL, target).await,
        Referer::AuthPage => Ok(()),
        Referer::Foreign => session
            .remove::<String>(session_keys::REDIRECT_URL)
            .await
            .map(drop),
    }
}

/// Take (and forget) the remembered post-login URL.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn take_redirect_url(
    session: &Session,
) -> Result<Option<String>, tower_sessions::session::Error> {
    session.remove::<String>(session_keys::REDIRECT_URL).await
}

/// What a `Referer` header points at.
#[derive(Debug, PartialEq, Eq)]
enum Referer {
    /// A same-origin page, reduced to path and query.
    Page(String),
    /// `/login`, `/register` or `/logout` on this site.
    AuthPage,
    /// Another origin, a non-http scheme or an unparsable value.
    Foreign,
}

fn classify_referer(referer: &str, base_url: &Url) -> Referer {
    let Ok(url) = base_url.join(referer.trim()) else {
        return Referer::Foreign;
    };

    if url.scheme() != base_url.scheme()
        || url.host_str() != base_url.host_str()
        || url.port_or_known_default() != base_url.port_or_known_default()
    {
        return Referer::Foreign;
    }
    if AUTH_PATHS.contains(&url.path()) {
        return Referer::AuthPage;
    }

    Referer::Page(match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_owned(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://localhost:8080").unwrap()
    }

    #[test]
    fn test_same_origin_referer_keeps_path_and_query() {
        assert_eq!(
            classify_referer("http://localhost:8080/owners/list?x=1", &base()),
            Referer::Page("/owners/list?x=1".to_owned())
        );
    }

    #[test]
    fn test_relative_referer_is_accepted() {
        assert_eq!(
            classify_referer("/owners/3/dogs", &base()),
            Referer::Page("/owners/3/dogs".to_owned())
        );
    }

    #[test]
    fn test_foreign_referers_are_rejected() {
        assert_eq!(classify_referer("https://evil.example/owners", &base()), Referer::Foreign);
        assert_eq!(classify_referer("http://localhost:9090/home", &base()), Referer::Foreign);
        assert_eq!(classify_referer("//evil.example/home", &base()), Referer::Foreign);
        assert_eq!(classify_referer("javascript:alert(1)", &base()), Referer::Foreign);
    }

    #[test]
    fn test_auth_pages_are_not_remembered() {
        for path in ["/login", "/login?error", "/register", "/logout"] {
            assert_eq!(classify_referer(path, &base()), Referer::AuthPage, "{path}");
        }
    }
}
