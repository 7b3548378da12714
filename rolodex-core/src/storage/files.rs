// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Processed-file storage operations.

use std::collections::BTreeMap;

use rusqlite::{params, params_from_iter, Row};

use super::{Storage, StorageError};
use crate::contact::ProcessedFile;

const FILE_COLUMNS: &str =
    "id, filename, file_size, file_hash, processed_at, row_count, original_columns_json";

fn read_file_row(row: &Row<'_>) -> rusqlite::Result<(ProcessedFile, Option<String>)> {
    Ok((
        ProcessedFile {
            id: row.get(0)?,
            filename: row.get(1)?,
            file_size: row.get::<_, i64>(2)?.max(0) as u64,
            file_hash: row.get(3)?,
            processed_at: row.get::<_, i64>(4)?.max(0) as u64,
            row_count: row.get::<_, i64>(5)?.max(0) as u64,
            original_columns: Vec::new(),
        },
        row.get(6)?,
    ))
}

fn with_columns(
    (mut file, columns_json): (ProcessedFile, Option<String>),
) -> Result<ProcessedFile, StorageError> {
    if let Some(json) = columns_json {
        file.original_columns =
            serde_json::from_str(&json).map_err(|e| StorageError::Serialization(e.to_string()))?;
    }
    Ok(file)
}

impl Storage {
    // === Processed File Operations ===

    /// Records a processed file.
    ///
    /// Fails with `AlreadyExists` if a file with the same content hash is stored.
    pub fn save_file(&self, file: &ProcessedFile) -> Result<(), StorageError> {
        if let Some(existing) = self.find_file_by_hash(&file.file_hash)? {
            if existing.id != file.id {
                return Err(StorageError::AlreadyExists(format!(
                    "file with hash {} ({})",
                    file.file_hash, existing.filename
                )));
            }
        }

        let columns_json = serde_json::to_string(&file.original_columns)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        self.conn.execute(
            "INSERT OR REPLACE INTO processed_files
             (id, filename, file_size, file_hash, processed_at, row_count, original_columns_json)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                file.id,
                file.filename,
                file.file_size as i64,
                file.file_hash,
                file.processed_at as i64,
                file.row_count as i64,
                columns_json,
            ],
        )?;

        Ok(())
    }

    /// Loads a processed file by ID.
    pub fn load_file(&self, id: &str) -> Result<Option<ProcessedFile>, StorageError> {
        let sql = format!("SELECT {} FROM processed_files WHERE id = ?1", FILE_COLUMNS);
        match self.conn.query_row(&sql, params![id], read_file_row) {
            Ok(row) => Ok(Some(with_columns(row)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StorageError::Database(e)),
        }
    }

    /// Finds a processed file by content hash.
    pub fn find_file_by_hash(&self, hash: &str) -> Result<Option<ProcessedFile>, StorageError> {
        let sql = format!(
            "SELECT {} FROM processed_files WHERE file_hash = ?1",
            FILE_COLUMNS
        );
        match self.conn.query_row(&sql, params![hash], read_file_row) {
            Ok(row) => Ok(Some(with_columns(row)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StorageError::Database(e)),
        }
    }

    /// Lists processed files, most recent first.
    pub fn list_files(&self) -> Result<Vec<ProcessedFile>, StorageError> {
        let sql = format!(
            "SELECT {} FROM processed_files ORDER BY processed_at DESC, rowid DESC",
            FILE_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], read_file_row)?;

        let mut files = Vec::new();
        for row in rows {
            files.push(with_columns(row?)?);
        }
        Ok(files)
    }

    /// Deletes a processed file together with all of its contacts.
    ///
    /// Returns the number of contacts removed.
    pub fn delete_file(&self, id: &str) -> Result<u64, StorageError> {
        self.with_transaction(|storage| {
            let removed = storage
                .conn
                .execute("DELETE FROM contacts WHERE file_id = ?1", params![id])?;
            let files = storage
                .conn
                .execute("DELETE FROM processed_files WHERE id = ?1", params![id])?;
            if files == 0 {
                return Err(StorageError::NotFound(format!("file {}", id)));
            }
            Ok(removed as u64)
        })
    }

    /// Maps file IDs to filenames. Unknown IDs are left out.
    pub fn file_names(&self, ids: &[String]) -> Result<BTreeMap<String, String>, StorageError> {
        let mut names = BTreeMap::new();
        for chunk in ids.chunks(500) {
            let placeholders = (1..=chunk.len())
                .map(|i| format!("?{}", i))
                .collect::<Vec<_>>()
                .join(", ");
            let sql = format!(
                "SELECT id, filename FROM processed_files WHERE id IN ({})",
                placeholders
            );
            let mut stmt = self.conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(chunk.iter()), |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?;
            for row in rows {
                let (id, filename) = row?;
                names.insert(id, filename);
            }
        }
        Ok(names)
    }
}
