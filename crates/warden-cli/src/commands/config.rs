//! Configuration CLI commands.

use clap::{Args, Subcommand};

use warden_core::error::AppError;

use super::Cli;
use crate::output::{self, Field};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (secrets omitted)
    Show,
    /// Load the configuration and check the signing settings
    Validate,
}

/// Execute config commands
pub async fn execute(args: &ConfigArgs, cli: &Cli) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = cli.load_config()?;
            let rows = vec![
                Field::new("server", config.server.bind_address()),
                Field::new("jwt.issuer", &config.jwt.issuer),
                Field::new("jwt.audience", &config.jwt.audience),
                Field::new(
                    "jwt.expires_minutes",
                    config.jwt.resolved_expires_minutes().to_string(),
                ),
                Field::new("admin.enabled", config.admin.enabled.to_string()),
                Field::new("admin.username", &config.admin.username),
                Field::new("logging.level", &config.logging.level),
            ];
            output::print_fields(&rows, &config, cli.format);
        }
        ConfigCommand::Validate => {
            let config = cli.load_config()?;
            let signing = config.jwt.signing_config().inspect_err(|e| {
                output::print_error(&format!("Configuration '{}' is invalid", cli.config));
                tracing::debug!(error = %e, "Signing configuration rejected");
            })?;

            if config.admin.enabled
                && config
                    .admin
                    .password
                    .as_deref()
                    .is_none_or(|p| p.trim().is_empty())
            {
                output::print_error("admin.password is required while admin.enabled = true");
                return Err(AppError::configuration(
                    "Administrator password is not configured (admin.password)",
                ));
            }

            output::print_success(&format!("Configuration '{}' is valid", cli.config));
            let rows = vec![
                Field::new("server", config.server.bind_address()),
                Field::new("issuer", signing.issuer()),
                Field::new("audience", signing.audience()),
                Field::new("expires_minutes", signing.expires_minutes().to_string()),
                Field::new("key_bytes", signing.key().len().to_string()),
            ];
            output::print_fields(&rows, &rows, cli.format);
        }
    }

    Ok(())
}
