//! Traits through which the token core reaches the identity backend.
//!
//! The core never knows how identities, password hashes, or role
//! memberships are stored; any backend that honours these contracts can
//! be plugged in.

use async_trait::async_trait;

use crate::identity::model::{Claim, Identity};
use crate::result::AppResult;

/// Looks up identities and checks their passwords.
#[async_trait]
pub trait CredentialVerifier: Send + Sync + 'static {
    /// Find an identity by login name. Returns `Ok(None)` when unknown.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Identity>>;

    /// Returns `Ok(true)` if `password` matches the identity's stored secret.
    async fn check_password(&self, identity: &Identity, password: &str) -> AppResult<bool>;

    /// Performs the work of a password check for a login name that does
    /// not exist, so both rejections take comparable time. The outcome is
    /// discarded.
    async fn check_unknown_password(&self, _password: &str) -> AppResult<()> {
        Ok(())
    }
}

/// Supplies the roles and extra claims embedded in issued tokens.
#[async_trait]
pub trait RoleClaimStore: Send + Sync + 'static {
    /// Role names held by the identity, in a stable order.
    async fn get_roles(&self, identity: &Identity) -> AppResult<Vec<String>>;

    /// Custom claims attached to the identity, in a stable order.
    async fn get_claims(&self, identity: &Identity) -> AppResult<Vec<Claim>>;
}

