//! Database operations for the catalog `SQLite` store.
//!
//! # Tables
//!
//! - `countries` / `states` / `cities` - reference geography
//! - `categories` / `products` / `product_categories` / `product_images` - catalog
//! - `users` / `roles` / `user_roles` - identity
//!
//! # Migrations
//!
//! Migrations are stored in `crates/catalog/migrations/` and embedded via
//! [`MIGRATOR`]. They run at seed time (the original's ensure-created boot
//! semantics) and via:
//! ```bash
//! cargo run -p skyfare-cli -- migrate
//! ```

pub mod categories;
pub mod geo;
pub mod products;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use categories::CategoryRepository;
pub use geo::GeoRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file is created if it does not exist and foreign keys are
/// enforced on every connection.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be
/// established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Ensure the schema exists by running any pending migrations.
///
/// Idempotent: already-applied migrations are skipped.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails to apply.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}
