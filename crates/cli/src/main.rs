//! `PropertyHub` CLI - Database migrations and demo data.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! ph-cli migrate
//!
//! # Insert demo listings
//! ph-cli seed
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed database with demo listings

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ph-cli")]
#[command(author, version, about = "PropertyHub CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert demo listings
    Seed,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::demo_listings().await?,
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_subcommands() {
        let cli = Cli::try_parse_from(["ph-cli", "migrate"]).unwrap();
        assert!(matches!(cli.command, Commands::Migrate));

        let cli = Cli::try_parse_from(["ph-cli", "seed"]).unwrap();
        assert!(matches!(cli.command, Commands::Seed));

        assert!(Cli::try_parse_from(["ph-cli", "drop"]).is_err());
    }
}
