//! Integration tests for administrator user management.

mod helpers;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_create_user_returns_location() {
    let app = helpers::TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .request(
            "POST",
            "/api/user",
            Some(json!({
                "username": "frank",
                "email": "frank@test.com",
                "password": "password1",
                "fullName": "Frank F",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.body["id"].as_str().unwrap();
    assert_eq!(response.body["username"], "frank");
    assert_eq!(response.body["email"], "frank@test.com");
    assert_eq!(
        response.headers.get("location").unwrap(),
        format!("/api/user/{id}").as_str()
    );

    // The new user can log in straight away.
    app.login("frank", "password1").await;
}

#[tokio::test]
async fn test_create_user_validation_and_conflict() {
    let app = helpers::TestApp::new().await;
    let token = app.admin_token().await;

    let bad_email = app
        .request(
            "POST",
            "/api/user",
            Some(json!({ "username": "gina", "email": "not-an-email", "password": "password1" })),
            Some(&token),
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);
    assert!(bad_email.body["details"]["email"].is_array());

    let short_password = app
        .request(
            "POST",
            "/api/user",
            Some(json!({ "username": "gina", "email": "g@test.com", "password": "12345" })),
            Some(&token),
        )
        .await;
    assert_eq!(short_password.status, StatusCode::BAD_REQUEST);

    let duplicate = app
        .request(
            "POST",
            "/api/user",
            Some(json!({ "username": "ADMIN", "email": "x@test.com", "password": "password1" })),
            Some(&token),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_get_user_includes_roles() {
    let app = helpers::TestApp::new().await;
    let token = app.admin_token().await;
    let id = app
        .create_test_user("hank", "password1", &["Pharmacist"], &[])
        .await;

    let response = app
        .request("GET", &format!("/api/user/{id}"), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], id.as_str());
    assert_eq!(response.body["username"], "hank");
    assert_eq!(response.body["fullName"], "hank tester");
    assert_eq!(response.body["roles"], json!(["Pharmacist"]));
}

#[tokio::test]
async fn test_get_missing_user_is_user_not_found() {
    let app = helpers::TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .request("GET", "/api/user/does-not-exist", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "user_not_found");
}

#[tokio::test]
async fn test_update_user_changes_only_provided_fields() {
    let app = helpers::TestApp::new().await;
    let token = app.admin_token().await;
    let id = app.create_test_user("ivan", "password1", &[], &[]).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/user/{id}"),
            Some(json!({ "fullName": "Ivan I" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], id.as_str());
    assert_eq!(response.body["username"], "ivan");
    assert_eq!(response.body["email"], "ivan@test.com");
    assert_eq!(response.body["fullName"], "Ivan I");

    let missing = app
        .request(
            "PUT",
            "/api/user/does-not-exist",
            Some(json!({ "fullName": "x" })),
            Some(&token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rename_changes_login_name_and_token_claims() {
    let app = helpers::TestApp::new().await;
    let token = app.admin_token().await;
    let id = app.create_test_user("judy", "password1", &[], &[]).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/user/{id}"),
            Some(json!({ "username": "judith" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let refused = app
        .request(
            "POST",
            "/api/token",
            Some(json!({ "username": "judy", "password": "password1" })),
            None,
        )
        .await;
    assert_eq!(refused.status, StatusCode::UNAUTHORIZED);

    let verified = warden_auth::TokenVerifier::new(&app.signing())
        .verify(&app.login("judith", "password1").await)
        .unwrap();
    assert_eq!(verified.subject, id);
    assert_eq!(verified.username.as_deref(), Some("judith"));
}

#[tokio::test]
async fn test_user_routes_require_admin_token() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("kate", "password1", &["Cashier"], &[])
        .await;
    let user_token = app.login("kate", "password1").await;

    let anonymous = app.request("GET", "/api/user/anything", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let forged = app
        .request("GET", "/api/user/anything", None, Some("a.b.c"))
        .await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);

    let not_admin = app
        .request(
            "POST",
            "/api/user",
            Some(json!({ "username": "leo", "email": "l@test.com", "password": "password1" })),
            Some(&user_token),
        )
        .await;
    assert_eq!(not_admin.status, StatusCode::FORBIDDEN);
}
