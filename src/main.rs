//! Warden Server: token issuance service
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use warden_api::AppState;
use warden_core::config::AppConfig;
use warden_core::error::AppError;
use warden_identity::InMemoryIdentityStore;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(kind = %e.kind, "Server error: {}", e.message);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("WARDEN_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    let env = std::env::var("WARDEN_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load(&config_path, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Warden v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Validate signing configuration ───────────────────
    let signing = config.jwt.signing_config()?;
    tracing::info!(
        issuer = %signing.issuer(),
        audience = %signing.audience(),
        expires_minutes = signing.expires_minutes(),
        "Signing configuration loaded"
    );

    // ── Step 2: Identity store and services ──────────────────────
    let store = Arc::new(InMemoryIdentityStore::new());
    let admin = config.admin.clone();
    let state = AppState::new(config, store)?;

    // ── Step 3: Administrator bootstrap ──────────────────────────
    if let Some(identity) = warden_identity::seed_admin(&state.user_service, &admin).await? {
        tracing::info!(user_id = %identity.id, role = %admin.role, "Administrator ready");
    }

    // ── Step 4: Serve ────────────────────────────────────────────
    warden_api::run_server(state).await?;

    tracing::info!("Warden stopped");
    Ok(())
}
