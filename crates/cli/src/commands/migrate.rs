//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! skyfare migrate
//! ```
//!
//! # Environment Variables
//!
//! - `CATALOG_DATABASE_URL` - `SQLite` connection string (falls back to
//!   `DATABASE_URL`)

use skyfare_catalog::config::CatalogConfig;
use skyfare_catalog::db;

/// Apply all pending schema migrations.
///
/// # Errors
///
/// Returns an error if configuration is incomplete, the connection fails, or
/// a migration fails to apply.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = CatalogConfig::from_env()?;

    tracing::info!("Connecting to catalog database...");
    let pool = db::create_pool(&config.database_url).await?;

    tracing::info!("Running catalog migrations...");
    db::ensure_schema(&pool).await?;

    tracing::info!("Catalog migrations complete!");
    Ok(())
}
