//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Token request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TokenRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create user request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Username.
    #[validate(length(min = 1, max = 100))]
    pub username: String,
    /// Email.
    #[validate(email)]
    pub email: String,
    /// Password.
    #[validate(length(min = 6, max = 100))]
    pub password: String,
    /// Display name.
    #[validate(length(max = 200))]
    pub full_name: Option<String>,
}

/// Update user request (admin). Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    /// New username.
    #[validate(length(min = 1, max = 100))]
    pub username: Option<String>,
    /// New email.
    #[validate(email)]
    pub email: Option<String>,
    /// New display name.
    #[validate(length(max = 200))]
    pub full_name: Option<String>,
}
