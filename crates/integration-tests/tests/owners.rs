//! Pet owner pages.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use pet_city_integration_tests::TestApp;

async fn logged_in() -> TestApp {
    let mut app = TestApp::new();
    app.register("vet@example.com", "woof").await;
    app
}

#[tokio::test]
async fn test_empty_owner_list_shows_message() {
    let mut app = logged_in().await;

    let response = app.get("/owners/list").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("No pet owners found"));
}

#[tokio::test]
async fn test_insert_is_open_to_anonymous_users() {
    let mut app = TestApp::new();
    app.create_owner("Maria", "Papadopoulou").await;

    let mut vet = app.new_browser();
    vet.register("vet@example.com", "woof").await;
    let response = vet.get("/owners/list").await;

    assert!(response.body.contains("Maria"));
    assert!(response.body.contains("Papadopoulou"));
}

#[tokio::test]
async fn test_insert_form_requires_login() {
    let mut app = TestApp::new();

    let response = app.get("/owners/insert").await;

    assert_eq!(response.location(), Some("/login"));
}

#[tokio::test]
async fn test_invalid_owner_is_redisplayed() {
    let mut app = logged_in().await;

    let response = app
        .post_form(
            "/owners/insert",
            &[
                ("firstname", "Al"),
                ("lastname", "Georgiou"),
                ("phone_number", "12345"),
                ("email", "not-an-email"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("First name must be between 3 and 50 characters"));
    assert!(response.body.contains("Phone number must be 10 digits"));
    assert!(response.body.contains("Email address is not valid"));
    assert!(response.body.contains("value=\"Georgiou\""));
}

#[tokio::test]
async fn test_show_missing_owner_is_not_found() {
    let mut app = logged_in().await;

    let response = app.get("/owners/99").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("Pet owner with id 99 does not exist"));
}

#[tokio::test]
async fn test_error_page_does_not_offer_login_to_logged_in_users() {
    let mut app = logged_in().await;

    let response = app.get("/owners/99").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(!response.body.contains("href=\"/register\""));
    assert!(response.body.contains("href=\"/owners/list\""));
}

#[tokio::test]
async fn test_malformed_owner_ids_render_error_page() {
    let mut app = logged_in().await;

    for path in ["/owners/abc", "/owners/99999999999", "/owners/update/abc"] {
        let response = app.get(path).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{path}");
        assert!(response.body.contains("Invalid ID provided"), "{path}");
    }
}

#[tokio::test]
async fn test_update_replaces_owner_details() {
    let mut app = logged_in().await;
    app.create_owner("Maria", "Papadopoulou").await;

    let form = app.get("/owners/update/1").await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains("value=\"Maria\""));

    let response = app
        .post_form(
            "/owners/update/1",
            &[
                ("firstname", "Marina"),
                ("lastname", "Papadopoulou"),
                ("phone_number", "2109876543"),
                ("email", "marina@example.com"),
            ],
        )
        .await;
    assert_eq!(response.location(), Some("/owners/list"));

    let details = app.get("/owners/1").await;
    assert!(details.body.contains("Marina Papadopoulou"));
    assert!(details.body.contains("2109876543"));
}

#[tokio::test]
async fn test_update_missing_owner_is_not_found() {
    let mut app = logged_in().await;

    let response = app
        .post_form(
            "/owners/update/7",
            &[
                ("firstname", "Marina"),
                ("lastname", "Papadopoulou"),
                ("phone_number", "2109876543"),
                ("email", "marina@example.com"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_rejects_non_positive_id() {
    let mut app = logged_in().await;

    for path in ["/owners/delete/0", "/owners/delete/-4"] {
        let response = app.get(path).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{path}");
        assert!(response.body.contains("Invalid ID provided"));
    }
}

#[tokio::test]
async fn test_delete_owner_cascades_to_dogs() {
    let mut app = logged_in().await;
    app.create_owner("Maria", "Papadopoulou").await;
    app.create_dog(1, "Argos", "7").await;
    app.create_dog(1, "Luna", "2").await;

    let response = app.get("/owners/delete/1").await;
    assert_eq!(response.location(), Some("/owners/list"));

    assert_eq!(app.get("/owners/1").await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/dogs/1").await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/dogs/2").await.status, StatusCode::NOT_FOUND);

    let home = app.get("/home").await;
    assert!(home.body.contains("<strong>0</strong> dogs"));
}

#[tokio::test]
async fn test_delete_missing_owner_is_not_found() {
    let mut app = logged_in().await;

    let response = app.get("/owners/delete/3").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
