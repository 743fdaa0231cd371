//! Credential check in front of token issuance.

use std::sync::Arc;

use tracing::{info, warn};

use warden_core::error::AppError;
use warden_core::identity::{CredentialVerifier, Identity};
use warden_core::result::AppResult;

use crate::issuer::{TokenIssuanceService, TokenResult};

/// Verifies a username/password pair and, only on success, issues tokens.
#[derive(Clone)]
pub struct Authenticator {
    /// Identity lookup and password check.
    verifier: Arc<dyn CredentialVerifier>,
    /// Issuance service invoked after a successful check.
    issuance: Arc<TokenIssuanceService>,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("issuance", &self.issuance)
            .finish_non_exhaustive()
    }
}

impl Authenticator {
    /// Creates an authenticator.
    pub fn new(verifier: Arc<dyn CredentialVerifier>, issuance: Arc<TokenIssuanceService>) -> Self {
        Self { verifier, issuance }
    }

    /// Checks credentials.
    ///
    /// An unknown username and a wrong password both yield
    /// [`AppError::invalid_credentials`]; callers cannot tell them apart.
    pub async fn verify_credentials(&self, username: &str, password: &str) -> AppResult<Identity> {
        let Some(identity) = self.verifier.find_by_username(username).await? else {
            self.verifier.check_unknown_password(password).await?;
            warn!(username = %username, "Login rejected");
            return Err(AppError::invalid_credentials());
        };

        if !self.verifier.check_password(&identity, password).await? {
            warn!(username = %username, "Login rejected");
            return Err(AppError::invalid_credentials());
        }

        Ok(identity)
    }

    /// Performs the login flow:
    ///
    /// 1. Verify credentials
    /// 2. Issue an access/refresh token pair
    pub async fn login(&self, username: &str, password: &str) -> AppResult<TokenResult> {
        let identity = self.verify_credentials(username, password).await?;
        let result = self.issuance.issue(&identity).await?;
        info!(user_id = %identity.id, "Login successful");
        Ok(result)
    }
}
