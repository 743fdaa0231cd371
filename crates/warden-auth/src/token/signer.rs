//! HS256 access token signing.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::Value;

use warden_core::config::{JwtConfig, SigningConfig};
use warden_core::error::{AppError, ErrorKind};
use warden_core::result::AppResult;

use super::claims::ClaimSet;

/// A signed access token and its validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedToken {
    /// Compact JWT serialization (`header.payload.signature`).
    pub token: String,
    /// Value of `iat` and `nbf`.
    pub issued_at: DateTime<Utc>,
    /// Value of `exp`.
    pub expires_at: DateTime<Utc>,
}

/// Creates signed, time-bounded access tokens.
#[derive(Clone)]
pub struct TokenSigner {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Validated signing configuration.
    config: SigningConfig,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("config", &self.config)
            .finish()
    }
}

impl TokenSigner {
    /// Creates a signer from a validated configuration.
    pub fn new(config: SigningConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.key()),
            config,
        }
    }

    /// Validates the raw `[jwt]` section and creates a signer.
    ///
    /// Fails with a configuration error when the key is absent or blank;
    /// no key material is touched in that case.
    pub fn from_config(config: &JwtConfig) -> AppResult<Self> {
        Ok(Self::new(config.signing_config()?))
    }

    /// The configuration this signer was built with.
    pub fn config(&self) -> &SigningConfig {
        &self.config
    }

    /// Signs `claims` with `issued_at` as both `iat` and `nbf`.
    ///
    /// `issued_at` is truncated to whole seconds so the returned window
    /// matches the encoded `iat` and `exp` exactly.
    ///
    /// The payload carries `iss`, `aud`, `sub`, `iat`, `nbf`, `exp` and
    /// every assembled claim. Registered claims always win over custom
    /// claims of the same name.
    pub fn sign(&self, claims: &ClaimSet, issued_at: DateTime<Utc>) -> AppResult<SignedToken> {
        let issued_at = issued_at.trunc_subsecs(0);
        let lifetime = Duration::try_minutes(self.config.expires_minutes())
            .ok_or_else(|| AppError::configuration("Token lifetime is out of range"))?;
        let expires_at = issued_at
            .checked_add_signed(lifetime)
            .ok_or_else(|| AppError::configuration("Token expiry overflows the calendar"))?;

        let subject = claims
            .subject()
            .ok_or_else(|| AppError::internal("Claim set has no subject"))?;

        let mut payload = claims.to_json_map();
        payload.insert("iss".into(), Value::from(self.config.issuer()));
        payload.insert("aud".into(), Value::from(self.config.audience()));
        payload.insert("sub".into(), Value::from(subject));
        payload.insert("iat".into(), Value::from(issued_at.timestamp()));
        payload.insert("nbf".into(), Value::from(issued_at.timestamp()));
        payload.insert("exp".into(), Value::from(expires_at.timestamp()));

        let token = encode(&Header::new(Algorithm::HS256), &payload, &self.encoding_key)
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Failed to encode access token", e)
            })?;

        Ok(SignedToken {
            token,
            issued_at,
            expires_at,
        })
    }
}
