//! Health checks and response headers.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use pet_city_integration_tests::TestApp;

#[tokio::test]
async fn test_health_endpoints() {
    let mut app = TestApp::new();

    let live = app.get("/health").await;
    assert_eq!(live.status, StatusCode::OK);
    assert_eq!(live.body, "ok");

    // No database behind the in-memory backend.
    assert_eq!(app.get("/health/ready").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_security_headers_are_set() {
    let mut app = TestApp::new();

    let response = app.get("/login").await;

    assert_eq!(response.headers["x-frame-options"], "DENY");
    assert_eq!(response.headers["x-content-type-options"], "nosniff");
    assert_eq!(response.headers["referrer-policy"], "same-origin");
    assert!(response.headers.contains_key("content-security-policy"));
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let mut app = TestApp::new();

    let response = app.get("/health").await;

    assert!(response.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let mut app = TestApp::new();

    let response = app.get("/cats").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
