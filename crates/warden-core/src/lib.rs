//! # warden-core
//!
//! Core crate for Warden. Contains the unified error system, configuration
//! schemas, the identity model, and the traits through which the token
//! issuance core reaches its identity backend.
//!
//! This crate has **no** internal dependencies on other Warden crates.

pub mod config;
pub mod error;
pub mod identity;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
