//! Administrator user management handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::response::{IntoResponse, Response};

use warden_core::error::{AppError, ErrorKind};
use warden_identity::{NewUser, UserChanges};

use crate::dto::request::{CreateUserRequest, UpdateUserRequest};
use crate::dto::response::{CreatedUserResponse, UpdatedUserResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AdminUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/user
pub async fn create_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> Result<Response, ApiError> {
    let identity = state
        .user_service
        .create(NewUser {
            username: req.username,
            email: Some(req.email),
            password: req.password,
            full_name: req.full_name,
        })
        .await?;

    let location = format!("/api/user/{}", identity.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(CreatedUserResponse::from(identity)),
    )
        .into_response())
}

/// PUT /api/user/{id}
pub async fn update_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UpdatedUserResponse>, ApiError> {
    let identity = state
        .user_service
        .update(
            &id,
            UserChanges {
                username: req.username,
                email: req.email,
                full_name: req.full_name,
            },
        )
        .await?;
    Ok(Json(UpdatedUserResponse::from(identity)))
}

/// GET /api/user/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let not_found = |e: AppError| ApiError::from(e).code_for(ErrorKind::NotFound, "user_not_found");
    let identity = state.user_service.get_by_id(&id).await.map_err(not_found)?;
    let roles = state.user_service.get_roles(&id).await.map_err(not_found)?;
    Ok(Json(UserResponse::new(identity, roles)))
}
