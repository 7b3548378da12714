//! Configuration for a Rolodex instance

use std::path::PathBuf;

use crate::import::DEFAULT_MAX_FILE_SIZE;

/// Configuration for opening a contact store.
#[derive(Debug, Clone)]
pub struct RolodexConfig {
    /// SQLite database file
    pub storage_path: PathBuf,

    /// Largest spreadsheet accepted for import (bytes)
    pub max_upload_size: u64,
}

impl Default for RolodexConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("contacts.db"),
            max_upload_size: DEFAULT_MAX_FILE_SIZE, // 10 MiB
        }
    }
}

impl RolodexConfig {
    /// Default configuration with a specific database file
    pub fn with_storage_path(path: impl Into<PathBuf>) -> Self {
        Self {
            storage_path: path.into(),
            ..Self::default()
        }
    }

    /// Override the import size limit
    pub fn with_max_upload_size(mut self, bytes: u64) -> Self {
        self.max_upload_size = bytes;
        self
    }
}
