//! Dog pages.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use pet_city_integration_tests::TestApp;

/// Logged-in app with owner 1 and no dogs.
async fn with_owner() -> TestApp {
    let mut app = TestApp::new();
    app.register("vet@example.com", "woof").await;
    app.create_owner("Nikos", "Georgiou").await;
    app
}

#[tokio::test]
async fn test_create_dog_lists_it_under_owner() {
    let mut app = with_owner().await;

    let response = app
        .post_form("/owners/1/dogs/create", &[("name", "Argos"), ("age", "7")])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/owners/1/dogs"));

    let list = app.get("/owners/1/dogs").await;
    assert_eq!(list.status, StatusCode::OK);
    assert!(list.body.contains("Argos"));
}

#[tokio::test]
async fn test_create_dog_under_missing_owner_is_not_found() {
    let mut app = with_owner().await;

    let response = app
        .post_form("/owners/5/dogs/create", &[("name", "Argos"), ("age", "7")])
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("Pet owner with id 5 does not exist"));
}

#[tokio::test]
async fn test_invalid_dog_is_redisplayed() {
    let mut app = with_owner().await;

    let response = app
        .post_form("/owners/1/dogs/create", &[("name", "A"), ("age", "40")])
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("Name must be between 2 and 50 characters"));
    assert!(response.body.contains("Age must not exceed 32"));
}

#[tokio::test]
async fn test_owner_without_dogs_shows_message() {
    let mut app = with_owner().await;

    let response = app.get("/owners/1/dogs").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("No dogs found"));
}

#[tokio::test]
async fn test_dogs_of_missing_owner_is_not_found() {
    let mut app = with_owner().await;

    let response = app.get("/owners/9/dogs").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dog_details_and_update() {
    let mut app = with_owner().await;
    app.create_dog(1, "Argos", "7").await;

    let details = app.get("/dogs/1").await;
    assert_eq!(details.status, StatusCode::OK);
    assert!(details.body.contains("Argos"));
    assert!(details.body.contains("Nikos Georgiou"));

    let response = app
        .post_form("/dogs/1/update", &[("name", "Argos II"), ("age", "8")])
        .await;
    assert_eq!(response.location(), Some("/dogs/1"));

    let details = app.get("/dogs/1").await;
    assert!(details.body.contains("Argos II"));
}

#[tokio::test]
async fn test_missing_dog_is_not_found() {
    let mut app = with_owner().await;

    let response = app.get("/dogs/42").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("Dog with id 42 does not exist"));
}

#[tokio::test]
async fn test_delete_dog_returns_to_owner_dogs() {
    let mut app = with_owner().await;
    app.create_dog(1, "Argos", "7").await;

    let response = app.get("/owners/1/dogs/delete/1").await;
    assert_eq!(response.location(), Some("/owners/1/dogs"));

    let list = app.get("/owners/1/dogs").await;
    assert!(list.body.contains("No dogs found"));
}

#[tokio::test]
async fn test_delete_dog_of_another_owner_is_not_found() {
    let mut app = with_owner().await;
    app.create_owner("Eleni", "Papadaki").await;
    app.create_dog(1, "Argos", "7").await;

    let response = app.get("/owners/2/dogs/delete/1").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/dogs/1").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_dog_rejects_non_positive_ids() {
    let mut app = with_owner().await;

    let response = app.get("/owners/1/dogs/delete/0").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.contains("Invalid ID provided"));
}

#[tokio::test]
async fn test_malformed_ids_render_error_page() {
    let mut app = with_owner().await;

    for path in [
        "/dogs/rex",
        "/dogs/99999999999",
        "/dogs/rex/update",
        "/owners/1/dogs/delete/rex",
    ] {
        let response = app.get(path).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{path}");
        assert!(response.body.contains("Invalid ID provided"), "{path}");
    }
}
