//! CLI Configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use rolodex_core::{DatabaseCatalog, Rolodex, RolodexConfig};
use tracing::debug;

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Data directory holding the database files.
    pub data_dir: PathBuf,
    /// Database name inside the data directory.
    pub database: String,
}

impl CliConfig {
    /// Catalog of database files in the data directory.
    pub fn catalog(&self) -> DatabaseCatalog {
        DatabaseCatalog::new(&self.data_dir)
    }

    /// Returns the path of the active database.
    pub fn storage_path(&self) -> PathBuf {
        self.catalog().path_for(&self.database)
    }

    /// Opens the active database, creating it on first use.
    pub fn open(&self) -> Result<Rolodex> {
        let path = self.storage_path();
        debug!(path = %path.display(), "opening database");
        Rolodex::open(RolodexConfig::with_storage_path(&path))
            .with_context(|| format!("Failed to open database {}", path.display()))
    }
}
