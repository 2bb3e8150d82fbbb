//! Skyfare CLI - Database migrations and seeding tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending schema migrations
//! skyfare migrate
//!
//! # Seed reference and demo data (idempotent)
//! skyfare seed
//!
//! # Seed without uploading images to object storage
//! skyfare seed --dry-run
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Populate empty tables with the fixed fixtures

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "skyfare")]
#[command(author, version, about = "Skyfare CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with reference and demo data
    Seed {
        /// Record image uploads in memory instead of hitting object storage
        #[arg(long)]
        dry_run: bool,
    },
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
        Commands::Seed { dry_run } => commands::seed::run(dry_run).await?,
    }
    Ok(())
}
