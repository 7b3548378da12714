// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Database catalog.
//!
//! A directory of `*.db` files, each a complete contact store. The catalog
//! only manages files; which database is in use is decided by whoever opens
//! a [`Storage`](super::Storage) handle.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use tracing::info;

use super::{Storage, StorageError};

const DB_EXTENSION: &str = "db";

/// A database file in the catalog directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseInfo {
    /// File name including the `.db` extension.
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    /// Last modification, Unix seconds.
    pub modified: u64,
    /// Whether this is the database the caller currently has open.
    pub is_active: bool,
}

/// Manages the database files in one directory.
#[derive(Debug, Clone)]
pub struct DatabaseCatalog {
    dir: PathBuf,
}

impl DatabaseCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DatabaseCatalog { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolves a database name to its path, adding `.db` if missing.
    pub fn path_for(&self, name: &str) -> PathBuf {
        let file_name = if name.ends_with(".db") {
            name.to_string()
        } else {
            format!("{}.{}", name, DB_EXTENSION)
        };
        self.dir.join(file_name)
    }

    /// Lists databases sorted by name. A missing directory lists as empty.
    pub fn list(&self, active: Option<&Path>) -> Result<Vec<DatabaseInfo>, StorageError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let active = active.and_then(|p| p.canonicalize().ok());
        let mut databases = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(DB_EXTENSION) {
                continue;
            }
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_secs())
                .unwrap_or(0);
            let is_active = match (&active, path.canonicalize()) {
                (Some(a), Ok(p)) => *a == p,
                _ => false,
            };

            databases.push(DatabaseInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                size: metadata.len(),
                modified,
                is_active,
            });
        }

        databases.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(databases)
    }

    /// Creates a new database with the current schema.
    pub fn create(&self, name: &str) -> Result<PathBuf, StorageError> {
        validate_name(name)?;
        let path = self.path_for(name);
        if path.exists() {
            return Err(StorageError::AlreadyExists(format!(
                "database {}",
                path.display()
            )));
        }

        fs::create_dir_all(&self.dir)?;
        Storage::open(&path)?;
        info!(path = %path.display(), "created database");
        Ok(path)
    }

    /// Deletes a database file. The active database cannot be deleted.
    pub fn delete(&self, name: &str, active: Option<&Path>) -> Result<(), StorageError> {
        validate_name(name)?;
        let path = self.path_for(name);
        if !path.exists() {
            return Err(StorageError::NotFound(format!("database {}", path.display())));
        }

        if let Some(active) = active {
            if active.canonicalize().ok() == path.canonicalize().ok() {
                return Err(StorageError::InvalidData(
                    "cannot delete the currently active database".into(),
                ));
            }
        }

        fs::remove_file(&path)?;
        info!(path = %path.display(), "deleted database");
        Ok(())
    }
}

/// Database names are plain file names inside the catalog directory.
fn validate_name(name: &str) -> Result<(), StorageError> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed.contains('/')
        || trimmed.contains('\\')
        || trimmed.starts_with('.')
    {
        return Err(StorageError::InvalidData(format!(
            "invalid database name: {:?}",
            name
        )));
    }
    Ok(())
}
