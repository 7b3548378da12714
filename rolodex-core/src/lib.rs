// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rolodex Core Library
//!
//! Imports contact spreadsheets into a SQLite store, groups duplicate
//! records by normalized email and phone, and merges confirmed groups.

pub mod api;
pub mod contact;
pub mod import;
pub mod storage;

pub use api::{
    DuplicateManager, MergeReport, Rolodex, RolodexConfig, RolodexError, RolodexResult,
    SimilarMatch, SimilarRecords, SimilarityFinder,
};
pub use contact::{
    absorb, find_duplicates, normalize_email, normalize_phone, ContactField, ContactRecord,
    DuplicateGroup, ExtraFields, MatchType, MergeOutcome, ProcessedFile,
};
pub use import::{ImportError, ImportedFile, Importer, DEFAULT_MAX_FILE_SIZE};
pub use storage::{DatabaseCatalog, DatabaseInfo, Storage, StorageError};
