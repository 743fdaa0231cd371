//! Token endpoint.

use axum::Json;
use axum::extract::State;

use crate::dto::request::TokenRequest;
use crate::dto::response::TokenResponse;
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/token
///
/// Exchanges a username and password for an access/refresh token pair.
pub async fn issue_token(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let result = state
        .authenticator
        .login(&req.username, &req.password)
        .await?;
    Ok(Json(TokenResponse::from(result)))
}
