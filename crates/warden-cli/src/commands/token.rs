//! Access token inspection.

use clap::{Args, Subcommand};
use serde_json::Value;

use warden_auth::{TokenVerifier, VerifiedToken};
use warden_core::error::AppError;

use super::Cli;
use crate::output::{self, Field};

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Verify a token with the configured secret and print its claims
    Inspect {
        /// Compact JWT
        token: String,
    },
}

/// Execute token commands
pub async fn execute(args: &TokenArgs, cli: &Cli) -> Result<(), AppError> {
    match &args.command {
        TokenCommand::Inspect { token } => {
            let config = cli.load_config()?;
            let verifier = TokenVerifier::new(&config.jwt.signing_config()?);
            let verified = verifier.verify(token.trim())?;
            output::print_fields(&claim_rows(&verified), &verified.claims, cli.format);
        }
    }
    Ok(())
}

/// One row per claim, in payload key order, with expiry rendered as a date.
fn claim_rows(token: &VerifiedToken) -> Vec<Field> {
    let mut rows: Vec<Field> = token
        .claims
        .iter()
        .map(|(name, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Array(items) => items
                    .iter()
                    .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                    .collect::<Vec<_>>()
                    .join(", "),
                other => other.to_string(),
            };
            Field::new(name.as_str(), value)
        })
        .collect();
    rows.push(Field::new("expires_at", token.expires_at.to_rfc3339()));
    rows
}
