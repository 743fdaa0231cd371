//! Token issuance for an already-verified identity.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use warden_core::identity::{Identity, RoleClaimStore};
use warden_core::result::AppResult;

use crate::token::{ClaimSet, RefreshTokenGenerator, TokenSigner};

/// Token type reported alongside every issued pair.
pub const TOKEN_TYPE: &str = "Bearer";

/// Everything handed back to a caller after a successful issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenResult {
    /// Signed access token.
    pub access_token: String,
    /// Opaque random refresh token.
    pub refresh_token: String,
    /// Access token expiry.
    pub expires_utc: DateTime<Utc>,
    /// Always [`TOKEN_TYPE`].
    pub token_type: &'static str,
}

/// Orchestrates claim assembly, signing, and refresh token generation.
///
/// Holds no mutable state; one instance serves any number of concurrent
/// issuances.
#[derive(Clone)]
pub struct TokenIssuanceService {
    /// Source of roles and custom claims.
    store: Arc<dyn RoleClaimStore>,
    /// Access token signer.
    signer: TokenSigner,
    /// Refresh token generator.
    refresh: RefreshTokenGenerator,
}

impl std::fmt::Debug for TokenIssuanceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuanceService")
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}

impl TokenIssuanceService {
    /// Creates an issuance service using the OS random source.
    pub fn new(store: Arc<dyn RoleClaimStore>, signer: TokenSigner) -> Self {
        Self::with_refresh_generator(store, signer, RefreshTokenGenerator::new())
    }

    /// Creates an issuance service with an explicit refresh generator.
    pub fn with_refresh_generator(
        store: Arc<dyn RoleClaimStore>,
        signer: TokenSigner,
        refresh: RefreshTokenGenerator,
    ) -> Self {
        Self {
            store,
            signer,
            refresh,
        }
    }

    /// Issues a fresh access/refresh token pair for `identity`.
    ///
    /// Roles and custom claims are read from the store on every call.
    /// Any failure is returned unchanged and nothing is issued.
    pub async fn issue(&self, identity: &Identity) -> AppResult<TokenResult> {
        let roles = self.store.get_roles(identity).await?;
        let custom = self.store.get_claims(identity).await?;

        let claims = ClaimSet::assemble(identity, &roles, &custom);
        debug!(user_id = %identity.id, claims = claims.len(), "Assembled claim set");

        let signed = self.signer.sign(&claims, Utc::now())?;
        let refresh_token = self.refresh.generate()?;

        info!(
            user_id = %identity.id,
            username = %identity.username,
            roles = ?roles,
            expires_at = %signed.expires_at,
            "Issued access token"
        );

        Ok(TokenResult {
            access_token: signed.token,
            refresh_token,
            expires_utc: signed.expires_at,
            token_type: TOKEN_TYPE,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use chrono::Duration;

    use warden_core::config::SigningConfig;
    use warden_core::error::{AppError, ErrorKind};
    use warden_core::identity::Claim;

    use super::*;
    use crate::token::{EntropySource, TokenVerifier};

    #[derive(Default)]
    struct StaticStore {
        roles: HashMap<String, Vec<String>>,
        claims: HashMap<String, Vec<Claim>>,
        fail: bool,
    }

    #[async_trait]
    impl RoleClaimStore for StaticStore {
        async fn get_roles(&self, identity: &Identity) -> AppResult<Vec<String>> {
            if self.fail {
                return Err(AppError::internal("role store offline"));
            }
            Ok(self.roles.get(&identity.id).cloned().unwrap_or_default())
        }

        async fn get_claims(&self, identity: &Identity) -> AppResult<Vec<Claim>> {
            Ok(self.claims.get(&identity.id).cloned().unwrap_or_default())
        }
    }

    struct BrokenEntropy;

    impl EntropySource for BrokenEntropy {
        fn fill(&self, _dest: &mut [u8]) -> AppResult<()> {
            Err(AppError::randomness("no entropy"))
        }
    }

    fn signing() -> SigningConfig {
        SigningConfig::new(b"issuer-secret-0123456789abcdef01", "warden", "clients", 30).unwrap()
    }

    fn alice_store() -> StaticStore {
        let mut store = StaticStore::default();
        store.roles.insert("u1".into(), vec!["Admin".into()]);
        store
            .claims
            .insert("u1".into(), vec![Claim::new("branch", "hanoi")]);
        store
    }

    fn alice() -> Identity {
        Identity::new("u1", "alice").with_email("a@x.com")
    }

    #[tokio::test]
    async fn test_issue_produces_verifiable_bearer_pair() {
        let service = TokenIssuanceService::new(Arc::new(alice_store()), TokenSigner::new(signing()));
        let before = Utc::now();
        let result = service.issue(&alice()).await.unwrap();

        assert_eq!(result.token_type, "Bearer");
        assert!(result.expires_utc > before);
        assert!(result.expires_utc <= Utc::now() + Duration::minutes(30));

        let verified = TokenVerifier::new(&signing())
            .verify(&result.access_token)
            .unwrap();
        assert_eq!(verified.subject, "u1");
        assert_eq!(verified.roles, vec!["Admin"]);
        assert_eq!(verified.claims["email"], "a@x.com");
        assert_eq!(verified.claims["branch"], "hanoi");
        assert_eq!(verified.expires_at, result.expires_utc);
        assert_eq!(
            verified.expires_at - verified.issued_at.unwrap(),
            Duration::minutes(30)
        );
    }

    #[tokio::test]
    async fn test_consecutive_issues_differ() {
        let service = TokenIssuanceService::new(Arc::new(alice_store()), TokenSigner::new(signing()));
        let first = service.issue(&alice()).await.unwrap();
        let second = service.issue(&alice()).await.unwrap();
        assert_ne!(first.refresh_token, second.refresh_token);
    }

    #[tokio::test]
    async fn test_store_failure_propagates_unchanged() {
        let store = StaticStore {
            fail: true,
            ..StaticStore::default()
        };
        let service = TokenIssuanceService::new(Arc::new(store), TokenSigner::new(signing()));
        let err = service.issue(&alice()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.message, "role store offline");
    }

    #[tokio::test]
    async fn test_randomness_failure_aborts_issuance() {
        let service = TokenIssuanceService::with_refresh_generator(
            Arc::new(alice_store()),
            TokenSigner::new(signing()),
            RefreshTokenGenerator::with_source(Arc::new(BrokenEntropy)),
        );
        let err = service.issue(&alice()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Randomness);
    }

    #[tokio::test]
    async fn test_parallel_issues_are_independent() {
        let service = Arc::new(TokenIssuanceService::new(
            Arc::new(alice_store()),
            TokenSigner::new(signing()),
        ));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.issue(&alice()).await })
            })
            .collect();

        let mut refresh_tokens = std::collections::HashSet::new();
        for handle in handles {
            let result = handle.await.unwrap().unwrap();
            assert!(refresh_tokens.insert(result.refresh_token));
        }
        assert_eq!(refresh_tokens.len(), 16);
    }
}
