//! Access token claims, signing, and verification plus refresh token generation.

pub mod claims;
pub mod refresh;
pub mod signer;
pub mod verifier;

pub use claims::ClaimSet;
pub use refresh::{EntropySource, OsEntropy, RefreshTokenGenerator};
pub use signer::{SignedToken, TokenSigner};
pub use verifier::{TokenVerifier, VerifiedToken};
