//! Integration test harness for Pet City.
//!
//! Builds the real router over the in-memory storage backend and an
//! in-memory session store, then drives it request by request with
//! `tower::ServiceExt::oneshot`. The session cookie is carried between
//! requests like a browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pet-city-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use tower::ServiceExt;
use tower_sessions::MemoryStore;

use pet_city_web::{AppConfig, AppState, middleware::create_session_layer};

/// Name of the session cookie set by the application.
pub const SESSION_COOKIE: &str = pet_city_web::middleware::session::SESSION_COOKIE_NAME;

/// Base URL the test configuration runs under.
pub const BASE_URL: &str = "http://localhost:8080";

/// A response reduced to what the tests look at.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

/// One browser session against a fresh application.
pub struct TestApp {
    router: Router,
    cookie: Option<String>,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// Fresh application with empty storage.
    ///
    /// # Panics
    ///
    /// Panics if the test configuration is rejected.
    #[must_use]
    pub fn new() -> Self {
        let config = AppConfig::from_lookup(|key| match key {
            "PETCITY_STORAGE" => Some("memory".to_owned()),
            "PETCITY_BASE_URL" => Some(BASE_URL.to_owned()),
            _ => None,
        })
        .expect("test configuration is valid");

        let session_layer = create_session_layer(MemoryStore::default(), &config);
        let router = pet_city_web::app(AppState::with_memory(config), session_layer);

        Self {
            router,
            cookie: None,
        }
    }

    /// Another browser (no cookie) against the same application and data.
    #[must_use]
    pub fn new_browser(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: None,
        }
    }

    /// Whether a session cookie is currently held.
    #[must_use]
    pub const fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    /// Send a GET request.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.send(Request::get(path), Body::empty()).await
    }

    /// Send a GET request with a `Referer` header.
    pub async fn get_with_referer(&mut self, path: &str, referer: &str) -> TestResponse {
        self.send(Request::get(path).header(header::REFERER, referer), Body::empty())
            .await
    }

    /// Send a url-encoded form.
    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();

        self.send(
            Request::post(path).header(header::CONTENT_TYPE, "application/x-www-form-urlencoded"),
            Body::from(body),
        )
        .await
    }

    /// Register an account, which also logs it in.
    ///
    /// # Panics
    ///
    /// Panics if registration does not redirect to `/home`.
    pub async fn register(&mut self, email: &str, password: &str) {
        let response = self
            .post_form(
                "/register",
                &[
                    ("email", email),
                    ("password", password),
                    ("confirm_password", password),
                ],
            )
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{}", response.body);
        assert_eq!(response.location(), Some("/home"));
    }

    /// Submit the login form.
    pub async fn login(&mut self, email: &str, password: &str) -> TestResponse {
        self.post_form("/login", &[("username", email), ("password", password)])
            .await
    }

    /// Log out.
    pub async fn logout(&mut self) -> TestResponse {
        self.post_form("/logout", &[]).await
    }

    /// Create a pet owner through the form.
    ///
    /// # Panics
    ///
    /// Panics if the owner is rejected.
    pub async fn create_owner(&mut self, firstname: &str, lastname: &str) {
        let response = self
            .post_form(
                "/owners/insert",
                &[
                    ("firstname", firstname),
                    ("lastname", lastname),
                    ("phone_number", "6912345678"),
                    ("email", "owner@example.com"),
                ],
            )
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{}", response.body);
    }

    /// Create a dog through the form.
    ///
    /// # Panics
    ///
    /// Panics if the dog is rejected.
    pub async fn create_dog(&mut self, owner_id: i32, name: &str, age: &str) {
        let response = self
            .post_form(
                &format!("/owners/{owner_id}/dogs/create"),
                &[("name", name), ("age", age)],
            )
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{}", response.body);
    }

    async fn send(&mut self, builder: axum::http::request::Builder, body: Body) -> TestResponse {
        let builder = match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        };
        let request = builder.body(body).expect("request is well formed");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        self.track_cookie(response.headers());

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body is readable");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// Keep, replace or drop the session cookie from `Set-Cookie`.
    fn track_cookie(&mut self, headers: &HeaderMap) {
        for value in headers.get_all(header::SET_COOKIE) {
            let Ok(value) = value.to_str() else {
                continue;
            };
            let Some(pair) = value.split(';').next() else {
                continue;
            };
            let Some((name, id)) = pair.trim().split_once('=') else {
                continue;
            };
            if name != SESSION_COOKIE {
                continue;
            }

            let expired = value.to_ascii_lowercase().contains("max-age=0");
            self.cookie = if id.is_empty() || expired {
                None
            } else {
                Some(format!("{name}={id}"))
            };
        }
    }
}
