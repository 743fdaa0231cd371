//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use warden_auth::{Authenticator, TokenIssuanceService, TokenSigner, TokenVerifier};
use warden_core::config::AppConfig;
use warden_core::result::AppResult;
use warden_identity::{InMemoryIdentityStore, PasswordPolicy, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Identity ─────────────────────────────────────────────
    /// User management service
    pub user_service: Arc<UserService>,

    // ── Auth ─────────────────────────────────────────────────
    /// Credential check followed by issuance
    pub authenticator: Arc<Authenticator>,
    /// Access token validator
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    /// Wires every service over `store`.
    ///
    /// Fails with a configuration error when the signing key is missing,
    /// before anything is served.
    pub fn new(config: AppConfig, store: Arc<InMemoryIdentityStore>) -> AppResult<Self> {
        let signer = TokenSigner::from_config(&config.jwt)?;
        let verifier = Arc::new(TokenVerifier::new(signer.config()));

        let issuance = Arc::new(TokenIssuanceService::new(store.clone(), signer));
        let authenticator = Arc::new(Authenticator::new(store.clone(), issuance));

        let user_service = Arc::new(UserService::new(store, PasswordPolicy::new(&config.password)));

        Ok(Self {
            config: Arc::new(config),
            user_service,
            authenticator,
            verifier,
        })
    }

    /// Role required for user management endpoints.
    pub fn admin_role(&self) -> &str {
        &self.config.admin.role
    }
}
