//! Access token validation.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde_json::{Map, Value};

use warden_core::config::SigningConfig;
use warden_core::error::AppError;
use warden_core::result::AppResult;

use super::claims::{ROLE, UNIQUE_NAME};

/// Claims of an access token whose signature, window, issuer and audience
/// have all been checked.
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    /// Identity id from `sub`.
    pub subject: String,
    /// Login name from `unique_name`, if present.
    pub username: Option<String>,
    /// Role names, in token order.
    pub roles: Vec<String>,
    /// `iat` as a timestamp.
    pub issued_at: Option<DateTime<Utc>>,
    /// `exp` as a timestamp.
    pub expires_at: DateTime<Utc>,
    /// The full decoded payload.
    pub claims: Map<String, Value>,
}

impl VerifiedToken {
    /// Returns `true` if the token carries `role`.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Validates access tokens issued by [`TokenSigner`](super::TokenSigner).
#[derive(Clone)]
pub struct TokenVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a verifier sharing the signer's secret, issuer and audience.
    pub fn new(config: &SigningConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 5; // seconds of clock skew
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.set_issuer(&[config.issuer()]);
        validation.set_audience(&[config.audience()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.key()),
            validation,
        }
    }

    /// Decodes and validates `token`.
    pub fn verify(&self, token: &str) -> AppResult<VerifiedToken> {
        let data = decode::<Map<String, Value>>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => AppError::unauthorized("Token has expired"),
                JwtErrorKind::ImmatureSignature => AppError::unauthorized("Token is not yet valid"),
                JwtErrorKind::InvalidSignature => AppError::unauthorized("Invalid token signature"),
                JwtErrorKind::InvalidIssuer => AppError::unauthorized("Invalid token issuer"),
                JwtErrorKind::InvalidAudience => AppError::unauthorized("Invalid token audience"),
                JwtErrorKind::InvalidToken => AppError::unauthorized("Invalid token format"),
                _ => AppError::unauthorized(format!("Token validation failed: {e}")),
            })?;

        let claims = data.claims;

        let subject = claims
            .get("sub")
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::unauthorized("Token has no subject"))?
            .to_string();

        let username = claims
            .get(UNIQUE_NAME)
            .and_then(Value::as_str)
            .map(str::to_string);

        let roles = match claims.get(ROLE) {
            Some(Value::String(role)) => vec![role.clone()],
            Some(Value::Array(values)) => values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        };

        let issued_at = timestamp(&claims, "iat");
        let expires_at = timestamp(&claims, "exp")
            .ok_or_else(|| AppError::unauthorized("Token has no valid expiry"))?;

        Ok(VerifiedToken {
            subject,
            username,
            roles,
            issued_at,
            expires_at,
            claims,
        })
    }
}

fn timestamp(claims: &Map<String, Value>, name: &str) -> Option<DateTime<Utc>> {
    claims
        .get(name)
        .and_then(Value::as_i64)
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}
