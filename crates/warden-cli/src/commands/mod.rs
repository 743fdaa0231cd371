//! CLI command definitions and dispatch.

pub mod config;
pub mod secret;
pub mod token;

use clap::{Parser, Subcommand};

use warden_core::config::AppConfig;
use warden_core::error::AppError;

use crate::output::OutputFormat;

/// Warden: token issuance service tooling
#[derive(Debug, Parser)]
#[command(name = "warden-cli", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Environment overlay loaded from `config/{env}.toml`
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Configuration checks
    Config(config::ConfigArgs),
    /// Signing secret utilities
    Secret(secret::SecretArgs),
    /// Access token utilities
    Token(token::TokenArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Config(args) => config::execute(args, self).await,
            Commands::Secret(args) => secret::execute(args, self.format),
            Commands::Token(args) => token::execute(args, self).await,
        }
    }

    /// Loads configuration from `--config`, the `--env` overlay, and
    /// `WARDEN__*` variables.
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load(&self.config, &self.env)
    }
}
