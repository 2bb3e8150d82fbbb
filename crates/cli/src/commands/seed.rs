//! Database seeding command.
//!
//! # Usage
//!
//! ```bash
//! skyfare seed
//! skyfare seed --dry-run
//! ```
//!
//! # Environment Variables
//!
//! - `CATALOG_DATABASE_URL` - `SQLite` connection string (falls back to
//!   `DATABASE_URL`)
//! - `STORAGE_BASE_URL` / `STORAGE_ACCESS_KEY` - Object-storage target
//! - `ASSETS_DIR` - Directory holding the seed image files

use skyfare_catalog::config::CatalogConfig;
use skyfare_catalog::db;
use skyfare_catalog::seed::{SeedReport, Seeder};
use skyfare_catalog::services::{HttpBlobStore, MemoryBlobStore};

/// Seed the database with reference and demo data.
///
/// Idempotent: tables that already hold data are left untouched. With
/// `dry_run` set, image uploads are recorded in memory instead of sent to
/// object storage.
///
/// # Errors
///
/// Returns an error if configuration is incomplete, the connection fails, or
/// any seed step fails.
pub async fn run(dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = CatalogConfig::from_env()?;

    tracing::info!("Connecting to catalog database...");
    let pool = db::create_pool(&config.database_url).await?;

    let report = if dry_run {
        tracing::info!("Seeding (dry run, uploads stay in memory)...");
        let blob = MemoryBlobStore::new();
        Seeder::new(&pool, &blob, &config.assets_dir).seed().await?
    } else {
        tracing::info!("Seeding...");
        let blob = HttpBlobStore::new(&config.storage);
        Seeder::new(&pool, &blob, &config.assets_dir).seed().await?
    };

    log_report(&report);
    Ok(())
}

fn log_report(report: &SeedReport) {
    if *report == SeedReport::default() {
        tracing::info!("Nothing to seed, all tables already populated");
        return;
    }
    tracing::info!(
        categories = report.categories,
        countries = report.countries,
        users = report.users,
        products = report.products,
        "Seed complete"
    );
}
