//! Response DTOs.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use warden_auth::TokenResult;
use warden_core::identity::Identity;

/// Successful token response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Signed access token.
    pub access_token: String,
    /// Opaque refresh token.
    pub refresh_token: String,
    /// Access token expiry, ISO-8601 UTC with a `Z` suffix.
    pub expires_utc: String,
    /// Always `"Bearer"`.
    pub token_type: String,
}

impl From<TokenResult> for TokenResponse {
    fn from(result: TokenResult) -> Self {
        Self {
            access_token: result.access_token,
            refresh_token: result.refresh_token,
            expires_utc: format_utc(result.expires_utc),
            token_type: result.token_type.to_string(),
        }
    }
}

/// Formats a timestamp as `2026-01-02T03:04:05Z`.
pub fn format_utc(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Body of `201 Created` for a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedUserResponse {
    /// User id.
    pub id: String,
    /// Username.
    pub username: String,
    /// Email.
    pub email: Option<String>,
}

impl From<Identity> for CreatedUserResponse {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            username: identity.username,
            email: identity.email,
        }
    }
}

/// Updated user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedUserResponse {
    /// User id.
    pub id: String,
    /// Username.
    pub username: String,
    /// Email.
    pub email: Option<String>,
    /// Display name.
    pub full_name: Option<String>,
}

impl From<Identity> for UpdatedUserResponse {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            username: identity.username,
            email: identity.email,
            full_name: identity.full_name,
        }
    }
}

/// Full user view including roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User id.
    pub id: String,
    /// Username.
    pub username: String,
    /// Email.
    pub email: Option<String>,
    /// Display name.
    pub full_name: Option<String>,
    /// Role names.
    pub roles: Vec<String>,
}

impl UserResponse {
    /// Builds the view from an identity and its roles.
    pub fn new(identity: Identity, roles: Vec<String>) -> Self {
        Self {
            id: identity.id,
            username: identity.username,
            email: identity.email,
            full_name: identity.full_name,
            roles,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Crate version.
    pub version: String,
}
