//! Bearer token extractors.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::warn;

use warden_auth::VerifiedToken;
use warden_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Claims of a valid access token from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct AuthUser(pub VerifiedToken);

impl std::ops::Deref for AuthUser {
    type Target = VerifiedToken;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

        Ok(AuthUser(state.verifier.verify(token)?))
    }
}

/// An [`AuthUser`] whose token carries the administrator role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub VerifiedToken);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(token) = AuthUser::from_request_parts(parts, state).await?;
        if !token.has_role(state.admin_role()) {
            warn!(user_id = %token.subject, "Administrator role required");
            return Err(AppError::forbidden("Administrator role required").into());
        }
        Ok(AdminUser(token))
    }
}
