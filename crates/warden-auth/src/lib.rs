//! # warden-auth
//!
//! The authentication and token issuance core for Warden.
//!
//! ## Modules
//!
//! - `token`: claim assembly, HS256 signing, verification, refresh token generation
//! - `issuer`: orchestrates a full issuance for a verified identity
//! - `authenticator`: credential check in front of issuance

pub mod authenticator;
pub mod issuer;
pub mod token;

pub use authenticator::Authenticator;
pub use issuer::{TOKEN_TYPE, TokenIssuanceService, TokenResult};
pub use token::{ClaimSet, RefreshTokenGenerator, TokenSigner, TokenVerifier, VerifiedToken};
