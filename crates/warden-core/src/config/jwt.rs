//! Token signing configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Access token lifetime used when none (or an invalid one) is configured.
pub const DEFAULT_EXPIRES_MINUTES: i64 = 60;

/// Raw `[jwt]` configuration section as read from files and environment.
///
/// Nothing here is trusted until [`JwtConfig::signing_config`] has
/// validated it.
#[derive(Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret. Mandatory.
    #[serde(default, skip_serializing)]
    pub key: Option<String>,
    /// Value of the `iss` claim.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Value of the `aud` claim.
    #[serde(default = "default_audience")]
    pub audience: String,
    /// Access token lifetime in minutes, kept as the raw configured text.
    #[serde(default)]
    pub expires_minutes: Option<String>,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("key", &self.key.as_ref().map(|_| "****"))
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expires_minutes", &self.expires_minutes)
            .finish()
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            key: None,
            issuer: default_issuer(),
            audience: default_audience(),
            expires_minutes: None,
        }
    }
}

impl JwtConfig {
    /// Resolves the configured lifetime, falling back to
    /// [`DEFAULT_EXPIRES_MINUTES`] when unset, unparsable, or not positive.
    pub fn resolved_expires_minutes(&self) -> i64 {
        resolve_expires_minutes(self.expires_minutes.as_deref())
    }

    /// Validates this section into an immutable [`SigningConfig`].
    pub fn signing_config(&self) -> Result<SigningConfig, AppError> {
        SigningConfig::new(
            self.key.as_deref().unwrap_or_default().as_bytes(),
            &self.issuer,
            &self.audience,
            self.resolved_expires_minutes(),
        )
    }
}

/// Parses a configured lifetime leniently.
///
/// Values are bounded by `u32` so the resulting expiry always fits in a
/// timestamp.
pub fn resolve_expires_minutes(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|m| *m > 0)
        .map(i64::from)
        .unwrap_or(DEFAULT_EXPIRES_MINUTES)
}

/// Validated, immutable signing configuration.
///
/// The only way to obtain one is through [`SigningConfig::new`], which
/// rejects an absent or blank key, so holding a `SigningConfig` proves a
/// usable secret is present.
#[derive(Clone)]
pub struct SigningConfig {
    key: Vec<u8>,
    issuer: String,
    audience: String,
    expires_minutes: i64,
}

impl std::fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningConfig")
            .field("key", &format_args!("<{} bytes>", self.key.len()))
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expires_minutes", &self.expires_minutes)
            .finish()
    }
}

impl SigningConfig {
    /// Builds a signing configuration.
    ///
    /// Fails with a configuration error when `key` is empty or only
    /// whitespace. A non-positive `expires_minutes` is replaced by
    /// [`DEFAULT_EXPIRES_MINUTES`].
    pub fn new(
        key: &[u8],
        issuer: impl Into<String>,
        audience: impl Into<String>,
        expires_minutes: i64,
    ) -> Result<Self, AppError> {
        if key.iter().all(u8::is_ascii_whitespace) {
            return Err(AppError::configuration(
                "JWT signing key is not configured (jwt.key)",
            ));
        }

        Ok(Self {
            key: key.to_vec(),
            issuer: issuer.into(),
            audience: audience.into(),
            expires_minutes: if expires_minutes > 0 {
                expires_minutes.min(i64::from(u32::MAX))
            } else {
                DEFAULT_EXPIRES_MINUTES
            },
        })
    }

    /// Raw secret bytes.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Token issuer.
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Token audience.
    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Access token lifetime in minutes (always positive).
    pub fn expires_minutes(&self) -> i64 {
        self.expires_minutes
    }
}

fn default_issuer() -> String {
    "warden".to_string()
}

fn default_audience() -> String {
    "warden-clients".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_missing_key_is_configuration_error() {
        let err = JwtConfig::default().signing_config().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_blank_key_is_configuration_error() {
        for key in ["", "   ", "\t\n"] {
            let config = JwtConfig {
                key: Some(key.to_string()),
                ..JwtConfig::default()
            };
            let err = config.signing_config().unwrap_err();
            assert_eq!(err.kind, ErrorKind::Configuration, "key {key:?}");
        }
    }

    #[test]
    fn test_expiry_fallbacks() {
        assert_eq!(resolve_expires_minutes(None), 60);
        assert_eq!(resolve_expires_minutes(Some("abc")), 60);
        assert_eq!(resolve_expires_minutes(Some("0")), 60);
        assert_eq!(resolve_expires_minutes(Some("-5")), 60);
        assert_eq!(resolve_expires_minutes(Some("")), 60);
        assert_eq!(resolve_expires_minutes(Some(" 45 ")), 45);
    }

    #[test]
    fn test_signing_config_replaces_non_positive_expiry() {
        let config = SigningConfig::new(b"secret", "iss", "aud", -10).unwrap();
        assert_eq!(config.expires_minutes(), DEFAULT_EXPIRES_MINUTES);
    }

    #[test]
    fn test_debug_hides_key() {
        let config = SigningConfig::new(b"super-secret", "iss", "aud", 5).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));

        let raw = JwtConfig {
            key: Some("super-secret".to_string()),
            ..JwtConfig::default()
        };
        assert!(!format!("{raw:?}").contains("super-secret"));
    }
}
