// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! API Error Types
//!
//! Unified error type for the Rolodex API layer.

use thiserror::Error;

use crate::import::ImportError;
use crate::storage::StorageError;

/// Unified error type for Rolodex operations.
///
/// "Nothing matched" is never an error: operations return empty results for
/// that. These variants mean the operation could not run.
#[derive(Error, Debug)]
pub enum RolodexError {
    /// Referenced file or record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed input, e.g. a merge group without a usable primary.
    #[error("validation error: {0}")]
    Validation(String),

    /// The store is unreachable or rejected a write.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Spreadsheet import failed.
    #[error("import error: {0}")]
    Import(#[from] ImportError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type for Rolodex operations.
pub type RolodexResult<T> = Result<T, RolodexError>;
