//! Signing secret generation.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use clap::{Args, Subcommand};

use warden_auth::token::{EntropySource, OsEntropy};
use warden_core::error::AppError;

use crate::output::{self, Field, OutputFormat};

/// Arguments for secret commands
#[derive(Debug, Args)]
pub struct SecretArgs {
    /// Secret subcommand
    #[command(subcommand)]
    pub command: SecretCommand,
}

/// Secret subcommands
#[derive(Debug, Subcommand)]
pub enum SecretCommand {
    /// Print a random base64 key suitable for `jwt.key`
    Generate {
        /// Number of random bytes
        #[arg(short, long, default_value_t = 64, value_parser = clap::value_parser!(u16).range(32..=1024))]
        bytes: u16,
    },
}

/// Execute secret commands
pub fn execute(args: &SecretArgs, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        SecretCommand::Generate { bytes } => {
            let secret = generate_secret(&OsEntropy, usize::from(*bytes))?;
            match format {
                OutputFormat::Table => println!("{secret}"),
                OutputFormat::Json => {
                    let rows = [Field::new("key", secret)];
                    output::print_fields(&rows, &rows[0], format);
                }
            }
        }
    }
    Ok(())
}

fn generate_secret(source: &dyn EntropySource, len: usize) -> Result<String, AppError> {
    let mut buf = vec![0u8; len];
    source.fill(&mut buf)?;
    Ok(STANDARD.encode(buf))
}
