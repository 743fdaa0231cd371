//! Route definitions for the Warden HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the API router with all routes, without outer middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(token_routes())
        .merge(user_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Token issuance
fn token_routes() -> Router<AppState> {
    Router::new().route("/token", post(handlers::token::issue_token))
}

/// Administrator user management
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user", post(handlers::user::create_user))
        .route(
            "/user/{id}",
            get(handlers::user::get_user).put(handlers::user::update_user),
        )
}

/// Health check (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
