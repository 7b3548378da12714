// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Common Test Utilities
//!
//! Shared fixtures and proptest strategies used across test modules.

#![allow(dead_code)]

pub mod strategies;

use rolodex_core::{ContactRecord, ProcessedFile, Storage};

/// In-memory storage with the full schema applied.
pub fn create_test_storage() -> Storage {
    Storage::in_memory().unwrap()
}

/// A record in `file_id` with the given email and phone.
pub fn record(file_id: &str, name: &str, email: &str, phone: &str) -> ContactRecord {
    ContactRecord {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        ..ContactRecord::for_file(file_id)
    }
}

/// A record with a fixed id, for tests that compare ids.
pub fn record_with_id(id: &str, email: &str, phone: &str) -> ContactRecord {
    ContactRecord {
        id: id.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        ..Default::default()
    }
}

/// File metadata with a hash derived from the id.
pub fn processed_file(id: &str, filename: &str) -> ProcessedFile {
    ProcessedFile {
        id: id.to_string(),
        filename: filename.to_string(),
        file_size: 128,
        file_hash: format!("hash-{}", id),
        processed_at: 1_700_000_000,
        row_count: 0,
        original_columns: vec!["name".into(), "email".into(), "phone".into()],
    }
}

/// Saves a file row and its records.
pub fn seed_file(storage: &Storage, file_id: &str, filename: &str, records: &[ContactRecord]) {
    let mut file = processed_file(file_id, filename);
    file.row_count = records.len() as u64;
    storage.save_file(&file).unwrap();
    for r in records {
        storage.save_contact(r).unwrap();
    }
}

/// Builds CSV bytes from a header line and data lines.
pub fn csv_bytes(lines: &[&str]) -> Vec<u8> {
    let mut out = lines.join("\n");
    out.push('\n');
    out.into_bytes()
}

/// Turns `&[&[&str]]` into owned merge groups.
pub fn groups(values: &[&[&str]]) -> Vec<Vec<String>> {
    values
        .iter()
        .map(|g| g.iter().map(|s| s.to_string()).collect())
        .collect()
}
