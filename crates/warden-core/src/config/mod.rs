//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files layered with `WARDEN__*` environment variables. Each
//! sub-module represents a logical configuration section.

pub mod admin;
pub mod app;
pub mod jwt;
pub mod logging;
pub mod password;

use serde::{Deserialize, Serialize};

pub use self::admin::AdminConfig;
pub use self::app::{CorsConfig, ServerConfig};
pub use self::jwt::{JwtConfig, SigningConfig};
pub use self::logging::LoggingConfig;
pub use self::password::PasswordConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Loaded once at process start and never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Token signing settings.
    #[serde(default)]
    pub jwt: JwtConfig,
    /// Password policy settings.
    #[serde(default)]
    pub password: PasswordConfig,
    /// Administrator seeding settings.
    #[serde(default)]
    pub admin: AdminConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files and the environment.
    ///
    /// `path` names the base file (extension optional). An overlay named
    /// `config/{env}` is merged on top when present, followed by
    /// environment variables such as `WARDEN__JWT__KEY`.
    pub fn load(path: &str, env: &str) -> Result<Self, AppError> {
        Self::load_with(path, env, Self::environment())
    }

    /// Environment source for `WARDEN__SECTION__KEY` variables.
    ///
    /// Values stay strings; numeric and boolean fields are converted on
    /// deserialization, so secrets made of digits keep every character.
    fn environment() -> config::Environment {
        config::Environment::with_prefix("WARDEN").separator("__")
    }

    fn load_with(
        path: &str,
        env: &str,
        environment: config::Environment,
    ) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(environment)
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml(document: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(document, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
