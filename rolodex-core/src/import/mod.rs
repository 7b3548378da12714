// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Spreadsheet Import
//!
//! Reads an uploaded CSV or Excel file, maps its columns onto contact
//! fields, and stores one contact per row under a new file ID. A file whose
//! content was already imported is rejected.

pub mod columns;
pub mod reader;

pub use columns::{clean_header, map_columns, ColumnTarget};
pub use reader::{read_table, SheetFormat, Table};

use std::path::Path;

use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, info};

use crate::contact::{unix_now, ContactRecord, ProcessedFile};
use crate::storage::{Storage, StorageError};

/// Default upload limit: 10 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Import error types.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("file too large: {size} bytes (limit {limit})")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("file already processed as {0}")]
    AlreadyProcessed(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Summary of one imported file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedFile {
    pub file: ProcessedFile,
    /// Cleaned header names, in file order.
    pub columns: Vec<String>,
}

/// Imports spreadsheets into a storage.
pub struct Importer<'a> {
    storage: &'a Storage,
    max_file_size: u64,
}

impl<'a> Importer<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Importer {
            storage,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Overrides the upload size limit.
    pub fn with_max_file_size(mut self, limit: u64) -> Self {
        self.max_file_size = limit;
        self
    }

    /// Reads and imports a file from disk.
    pub fn import_path(&self, path: &Path) -> Result<ImportedFile, ImportError> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        // Reject by extension and size before reading the whole file
        SheetFormat::from_filename(&filename)?;
        let size = std::fs::metadata(path)?.len();
        self.check_size(size)?;

        let bytes = std::fs::read(path)?;
        self.import_bytes(&filename, &bytes)
    }

    /// Imports file content that was already read into memory.
    pub fn import_bytes(&self, filename: &str, bytes: &[u8]) -> Result<ImportedFile, ImportError> {
        let format = SheetFormat::from_filename(filename)?;
        self.check_size(bytes.len() as u64)?;

        let file_hash = hex::encode(Sha256::digest(bytes));
        if let Some(existing) = self.storage.find_file_by_hash(&file_hash)? {
            return Err(ImportError::AlreadyProcessed(existing.filename));
        }

        let table = read_table(format, bytes)?;
        let file_id = uuid::Uuid::new_v4().to_string();
        let records = table_to_records(&table, &file_id);

        let file = ProcessedFile {
            id: file_id,
            filename: filename.to_string(),
            file_size: bytes.len() as u64,
            file_hash,
            processed_at: unix_now(),
            row_count: records.len() as u64,
            original_columns: table.headers.clone(),
        };

        self.storage.with_transaction(|storage| {
            for record in &records {
                storage.save_contact(record)?;
            }
            storage.save_file(&file)
        })?;

        info!(
            file_id = %file.id,
            filename = %file.filename,
            rows = file.row_count,
            "imported file"
        );

        Ok(ImportedFile {
            columns: table.headers.iter().map(|h| clean_header(h)).collect(),
            file,
        })
    }

    fn check_size(&self, size: u64) -> Result<(), ImportError> {
        if size > self.max_file_size {
            return Err(ImportError::FileTooLarge {
                size,
                limit: self.max_file_size,
            });
        }
        Ok(())
    }
}

/// Builds one contact per non-blank row.
pub fn table_to_records(table: &Table, file_id: &str) -> Vec<ContactRecord> {
    let targets = map_columns(&table.headers);
    let mut records = Vec::with_capacity(table.rows.len());

    for (row_index, row) in table.rows.iter().enumerate() {
        if row.iter().all(|cell| cell.trim().is_empty()) {
            debug!(row = row_index + 1, "skipping blank row");
            continue;
        }

        let mut record = ContactRecord::for_file(file_id);
        for (target, cell) in targets.iter().zip(row) {
            let value = cell.trim();
            if value.is_empty() {
                continue;
            }
            match target {
                ColumnTarget::Field(field) => *record.field_mut(*field) = value.to_string(),
                ColumnTarget::Notes => record.notes = value.to_string(),
                ColumnTarget::ReviewCount => record.review_count = parse_review_count(value),
                ColumnTarget::Extra(name) => {
                    record.extra_fields.insert(name.clone(), value.to_string());
                }
                ColumnTarget::Ignored => {}
            }
        }
        records.push(record);
    }

    records
}

/// Parses a review count cell; anything unparsable counts as zero.
fn parse_review_count(value: &str) -> u32 {
    let digits: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    digits
        .parse::<u32>()
        .ok()
        .or_else(|| {
            digits
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.min(u32::MAX as f64) as u32)
        })
        .unwrap_or(0)
}
