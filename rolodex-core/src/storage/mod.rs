// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persistent Storage Module
//!
//! SQLite storage for contact records and processed-file metadata.
//! A `Storage` value is the store handle: every operation goes through one,
//! and pointing the application at another database means opening another.

pub mod catalog;
mod contacts;
mod error;
mod files;
pub mod migration;

pub use catalog::{DatabaseCatalog, DatabaseInfo};
pub use error::StorageError;

use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// SQLite-based storage implementation.
pub struct Storage {
    conn: Connection,
    /// Database file, `None` for in-memory storage.
    path: Option<PathBuf>,
}

impl Storage {
    /// Opens or creates a storage database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path.as_ref())?;
        let storage = Storage {
            conn,
            path: Some(path.as_ref().to_path_buf()),
        };
        storage.run_migrations()?;
        Ok(storage)
    }

    /// Creates an in-memory storage (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let storage = Storage { conn, path: None };
        storage.run_migrations()?;
        Ok(storage)
    }

    /// Path of the backing database file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Runs all pending schema migrations.
    fn run_migrations(&self) -> Result<(), StorageError> {
        let migrations = migration::all_migrations();
        migration::MigrationRunner::run(&self.conn, &migrations)
    }

    /// Returns the current schema version.
    pub fn schema_version(&self) -> Result<u32, StorageError> {
        migration::MigrationRunner::current_version(&self.conn)
    }

    /// Runs `f` inside a single transaction.
    ///
    /// Commits when `f` returns `Ok`; any error rolls back every write `f`
    /// made through this storage.
    pub fn with_transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Storage) -> Result<T, E>,
        E: From<StorageError>,
    {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(StorageError::from)?;
        let value = f(self)?;
        tx.commit().map_err(StorageError::from)?;
        Ok(value)
    }
}
