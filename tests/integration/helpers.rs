//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use warden_api::AppState;
use warden_core::config::{AdminConfig, AppConfig, JwtConfig, SigningConfig};
use warden_core::identity::Claim;
use warden_identity::{NewUser, seed_admin};

pub const SECRET: &str = "integration-secret-0123456789abcdef";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-pass-1";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for direct service access
    pub state: AppState,
}

/// A captured response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub fn test_config() -> AppConfig {
    AppConfig {
        jwt: JwtConfig {
            key: Some(SECRET.to_string()),
            issuer: "warden-test".to_string(),
            audience: "warden-test-clients".to_string(),
            expires_minutes: Some("15".to_string()),
        },
        admin: AdminConfig {
            password: Some(ADMIN_PASSWORD.to_string()),
            ..AdminConfig::default()
        },
        ..AppConfig::default()
    }
}

impl TestApp {
    /// Create a new test application with a seeded administrator
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Create a test application from an explicit configuration
    pub async fn with_config(config: AppConfig) -> Self {
        let admin = config.admin.clone();
        let state = AppState::new(config, Arc::new(Default::default()))
            .expect("Failed to build state");
        seed_admin(&state.user_service, &admin)
            .await
            .expect("Failed to seed administrator");

        let router = warden_api::build_app(state.clone());
        Self { router, state }
    }

    /// Signing configuration matching the test app
    pub fn signing(&self) -> SigningConfig {
        self.state
            .config
            .jwt
            .signing_config()
            .expect("Test signing config")
    }

    /// Create a test user with optional roles and claims and return their id
    pub async fn create_test_user(
        &self,
        username: &str,
        password: &str,
        roles: &[&str],
        claims: &[(&str, &str)],
    ) -> String {
        let service = &self.state.user_service;
        let identity = service
            .create(NewUser {
                username: username.to_string(),
                email: Some(format!("{username}@test.com")),
                password: password.to_string(),
                full_name: Some(format!("{username} tester")),
            })
            .await
            .expect("Failed to create test user");

        for role in roles {
            service
                .add_to_role(&identity.id, role)
                .await
                .expect("Failed to add role");
        }
        for (name, value) in claims {
            service
                .add_claim(&identity.id, Claim::new(*name, *value))
                .await
                .expect("Failed to add claim");
        }

        identity.id
    }

    /// Request a token and return the access token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/token",
                Some(serde_json::json!({ "username": username, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        response.body["accessToken"]
            .as_str()
            .expect("accessToken missing")
            .to_string()
    }

    /// Access token for the seeded administrator
    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await
    }

    /// Make a JSON request
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.raw_request(method, path, body_str, token).await
    }

    /// Make a request with a raw body
    pub async fn raw_request(
        &self,
        method: &str,
        path: &str,
        body: String,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}
