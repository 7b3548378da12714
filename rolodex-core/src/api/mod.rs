// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rolodex API
//!
//! High-level interface for importing contact lists and reviewing
//! duplicates.
//!
//! # Overview
//!
//! The main entry point is the [`Rolodex`] struct, which holds the store
//! handle and delegates to:
//! - [`DuplicateManager`] - duplicate grouping and merge
//! - [`SimilarityFinder`] - cross-file matches
//! - [`crate::import::Importer`] - spreadsheet ingestion

mod config;
mod duplicates;
mod error;
mod rolodex;
mod similar;

pub use config::RolodexConfig;
pub use duplicates::{DuplicateManager, MergeReport};
pub use error::{RolodexError, RolodexResult};
pub use rolodex::Rolodex;
pub use similar::{SimilarMatch, SimilarRecords, SimilarityFinder};
