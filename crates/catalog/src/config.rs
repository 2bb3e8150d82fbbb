//! Catalog configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_DATABASE_URL` - `SQLite` connection string (falls back to
//!   `DATABASE_URL`)
//!
//! ## Optional
//! - `STORAGE_BASE_URL` - Object-storage base URL (default: historical blob
//!   host)
//! - `STORAGE_ACCESS_KEY` - Bearer key for object-storage uploads
//! - `ASSETS_DIR` - Directory holding the seed image files (default: `assets`)

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Default object-storage base URL, matching the historical blob account the
/// derived image URLs point at.
pub const DEFAULT_STORAGE_BASE_URL: &str = "https://shoppingzulu.blob.core.windows.net";

const DEFAULT_ASSETS_DIR: &str = "assets";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// Catalog application configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// `SQLite` database connection URL.
    pub database_url: SecretString,
    /// Object-storage configuration.
    pub storage: StorageConfig,
    /// Directory holding the seed image files.
    pub assets_dir: PathBuf,
}

/// Object-storage configuration.
///
/// Implements `Debug` manually to redact the access key.
#[derive(Clone)]
pub struct StorageConfig {
    /// Base URL uploads are PUT under and display URLs are derived from.
    pub base_url: String,
    /// Bearer key sent with uploads, if the store requires one.
    pub access_key: Option<SecretString>,
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("base_url", &self.base_url)
            .field("access_key", &self.access_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the database URL is missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("CATALOG_DATABASE_URL")?;
        let storage = StorageConfig::from_env();
        let assets_dir = PathBuf::from(get_env_or_default("ASSETS_DIR", DEFAULT_ASSETS_DIR));

        Ok(Self {
            database_url,
            storage,
            assets_dir,
        })
    }
}

impl StorageConfig {
    fn from_env() -> Self {
        Self {
            base_url: get_env_or_default("STORAGE_BASE_URL", DEFAULT_STORAGE_BASE_URL),
            access_key: get_optional_env("STORAGE_ACCESS_KEY").map(SecretString::from),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_owned()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_debug_redacts_access_key() {
        let config = StorageConfig {
            base_url: DEFAULT_STORAGE_BASE_URL.to_owned(),
            access_key: Some(SecretString::from("very-private-key")),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains(DEFAULT_STORAGE_BASE_URL));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("very-private-key"));
    }
}
