//! Integration tests for the token endpoint.

mod helpers;

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use http::StatusCode;
use serde_json::{Value, json};

use warden_auth::TokenVerifier;
use warden_core::config::AppConfig;

fn payload(token: &str) -> Value {
    let segment = token.split('.').nth(1).expect("payload segment");
    serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segment).expect("base64url")).expect("json")
}

#[tokio::test]
async fn test_token_success_shape() {
    let app = helpers::TestApp::new().await;
    let id = app
        .create_test_user("alice", "password1", &["Admin"], &[])
        .await;

    let before = Utc::now();
    let response = app
        .request(
            "POST",
            "/api/token",
            Some(json!({ "username": "alice", "password": "password1" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["tokenType"], "Bearer");

    let access = response.body["accessToken"].as_str().unwrap();
    assert_eq!(access.split('.').count(), 3);

    let refresh = response.body["refreshToken"].as_str().unwrap();
    assert_eq!(STANDARD.decode(refresh).unwrap().len(), 64);

    let expires: DateTime<Utc> = response.body["expiresUtc"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(expires > before);

    let claims = payload(access);
    assert_eq!(claims["sub"], id.as_str());
    assert_eq!(claims["unique_name"], "alice");
    assert_eq!(claims["email"], "alice@test.com");
    assert_eq!(claims["fullName"], "alice tester");
    assert_eq!(claims["role"], "Admin");
    assert_eq!(claims["iss"], "warden-test");
    assert_eq!(claims["aud"], "warden-test-clients");
    assert_eq!(claims["exp"], expires.timestamp());
    assert_eq!(
        claims["exp"].as_i64().unwrap() - claims["iat"].as_i64().unwrap(),
        15 * 60
    );
}

#[tokio::test]
async fn test_token_verifies_with_configured_secret() {
    let app = helpers::TestApp::new().await;
    app.create_test_user(
        "bob",
        "password1",
        &["Pharmacist", "Cashier"],
        &[("branch", "hanoi")],
    )
    .await;

    let token = app.login("bob", "password1").await;
    let verified = TokenVerifier::new(&app.signing()).verify(&token).unwrap();

    assert_eq!(verified.username.as_deref(), Some("bob"));
    assert_eq!(verified.roles, vec!["Pharmacist", "Cashier"]);
    assert_eq!(verified.claims["branch"], "hanoi");
}

#[tokio::test]
async fn test_bad_credentials_are_indistinguishable() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("carol", "password1", &[], &[]).await;

    let wrong_password = app
        .request(
            "POST",
            "/api/token",
            Some(json!({ "username": "carol", "password": "nope" })),
            None,
        )
        .await;
    let unknown_user = app
        .request(
            "POST",
            "/api/token",
            Some(json!({ "username": "nobody", "password": "nope" })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body["error"], "invalid_credentials");
    assert_eq!(wrong_password.body, unknown_user.body);
    assert!(wrong_password.body.get("accessToken").is_none());
}

#[tokio::test]
async fn test_malformed_input_is_bad_request() {
    let app = helpers::TestApp::new().await;

    let garbage = app
        .raw_request("POST", "/api/token", "{not json".to_string(), None)
        .await;
    assert_eq!(garbage.status, StatusCode::BAD_REQUEST);

    let missing_password = app
        .request("POST", "/api/token", Some(json!({ "username": "x" })), None)
        .await;
    assert_eq!(missing_password.status, StatusCode::BAD_REQUEST);

    let empty = app
        .request(
            "POST",
            "/api/token",
            Some(json!({ "username": "", "password": "" })),
            None,
        )
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.body["error"], "validation_error");
}

#[tokio::test]
async fn test_consecutive_logins_get_fresh_refresh_tokens() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("dave", "password1", &[], &[]).await;

    let body = json!({ "username": "dave", "password": "password1" });
    let first = app.request("POST", "/api/token", Some(body.clone()), None).await;
    let second = app.request("POST", "/api/token", Some(body), None).await;

    assert_ne!(first.body["refreshToken"], second.body["refreshToken"]);
}

#[tokio::test]
async fn test_role_changes_apply_to_next_token() {
    let app = helpers::TestApp::new().await;
    let id = app.create_test_user("erin", "password1", &[], &[]).await;

    let before = payload(&app.login("erin", "password1").await);
    assert!(before.get("role").is_none());

    app.state
        .user_service
        .add_to_role(&id, "Auditor")
        .await
        .unwrap();
    let after = payload(&app.login("erin", "password1").await);
    assert_eq!(after["role"], "Auditor");
}

#[tokio::test]
async fn test_unparsable_lifetime_defaults_to_sixty_minutes() {
    let mut config: AppConfig = helpers::test_config();
    config.jwt.expires_minutes = Some("soon".to_string());
    let app = helpers::TestApp::with_config(config).await;

    let claims = payload(&app.admin_token().await);
    assert_eq!(
        claims["exp"].as_i64().unwrap() - claims["iat"].as_i64().unwrap(),
        60 * 60
    );
}

#[test]
fn test_state_refuses_missing_key() {
    let mut config = helpers::test_config();
    config.jwt.key = Some("   ".to_string());
    let err = warden_api::AppState::new(config, Default::default()).unwrap_err();
    assert_eq!(err.kind, warden_core::error::ErrorKind::Configuration);
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}
