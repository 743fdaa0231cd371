//! # warden-api
//!
//! HTTP API layer for Warden built on Axum.
//!
//! Exposes the token endpoint, administrator-only user management, and a
//! health probe, together with the bearer extractor, DTOs, error mapping,
//! and request middleware.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
