//! Opaque refresh token generation.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use rand::RngCore;
use rand::rngs::OsRng;

use warden_core::error::{AppError, ErrorKind};
use warden_core::result::AppResult;

/// Number of random bytes in every refresh token.
pub const REFRESH_TOKEN_BYTES: usize = 64;

/// A source of cryptographically secure random bytes.
pub trait EntropySource: Send + Sync + 'static {
    /// Fills `dest` entirely or fails; partial fills are never reported as success.
    fn fill(&self, dest: &mut [u8]) -> AppResult<()>;
}

/// Operating system CSPRNG (`getrandom`).
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, dest: &mut [u8]) -> AppResult<()> {
        OsRng.try_fill_bytes(dest).map_err(|e| {
            AppError::with_source(
                ErrorKind::Randomness,
                "Operating system random source unavailable",
                e,
            )
        })
    }
}

/// Produces opaque refresh tokens unrelated to any access token claims.
#[derive(Clone)]
pub struct RefreshTokenGenerator {
    source: Arc<dyn EntropySource>,
}

impl std::fmt::Debug for RefreshTokenGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTokenGenerator").finish_non_exhaustive()
    }
}

impl RefreshTokenGenerator {
    /// Creates a generator backed by the operating system CSPRNG.
    pub fn new() -> Self {
        Self::with_source(Arc::new(OsEntropy))
    }

    /// Creates a generator over a custom entropy source.
    pub fn with_source(source: Arc<dyn EntropySource>) -> Self {
        Self { source }
    }

    /// Returns 64 fresh random bytes encoded as standard base64.
    ///
    /// Fails with [`ErrorKind::Randomness`] if the source cannot supply
    /// bytes; there is no fallback generator.
    pub fn generate(&self) -> AppResult<String> {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        self.source.fill(&mut bytes)?;
        Ok(STANDARD.encode(bytes))
    }
}

impl Default for RefreshTokenGenerator {
    fn default() -> Self {
        Self::new()
    }
}
