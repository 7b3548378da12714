// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rolodex Orchestrator
//!
//! Main entry point for the Rolodex API.

use std::path::Path;

use crate::contact::{ContactRecord, DuplicateGroup, ProcessedFile};
use crate::import::{ImportedFile, Importer};
use crate::storage::Storage;

use super::config::RolodexConfig;
use super::duplicates::{DuplicateManager, MergeReport};
use super::error::{RolodexError, RolodexResult};
use super::similar::{SimilarRecords, SimilarityFinder};

/// Main Rolodex orchestrator.
///
/// Owns one store handle. Working against a different database means
/// constructing another `Rolodex`; an existing instance never changes
/// the store it talks to.
///
/// # Example
///
/// ```ignore
/// use rolodex_core::{Rolodex, RolodexConfig};
///
/// let rolodex = Rolodex::open(RolodexConfig::with_storage_path("contacts.db"))?;
/// let imported = rolodex.import_file(Path::new("leads.xlsx"))?;
///
/// let groups = rolodex.find_duplicates(&imported.file.id)?;
/// let ids: Vec<Vec<String>> = groups.iter().map(|g| g.ids()).collect();
/// rolodex.merge_duplicates(&ids)?;
/// ```
pub struct Rolodex {
    config: RolodexConfig,
    storage: Storage,
}

impl Rolodex {
    /// Opens the store named by `config`, creating it if needed.
    pub fn open(config: RolodexConfig) -> RolodexResult<Self> {
        if let Some(parent) = config.storage_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| RolodexError::Configuration(e.to_string()))?;
            }
        }
        let storage = Storage::open(&config.storage_path)?;
        Ok(Rolodex { config, storage })
    }

    /// Creates a Rolodex with in-memory storage (for testing).
    pub fn in_memory() -> RolodexResult<Self> {
        Ok(Rolodex {
            config: RolodexConfig::default(),
            storage: Storage::in_memory()?,
        })
    }

    pub fn config(&self) -> &RolodexConfig {
        &self.config
    }

    /// Direct access to the store handle.
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    fn importer(&self) -> Importer<'_> {
        Importer::new(&self.storage).with_max_file_size(self.config.max_upload_size)
    }

    // === Files ===

    /// Imports a spreadsheet from disk.
    pub fn import_file(&self, path: &Path) -> RolodexResult<ImportedFile> {
        Ok(self.importer().import_path(path)?)
    }

    /// Imports spreadsheet bytes under the given filename.
    pub fn import_bytes(&self, filename: &str, bytes: &[u8]) -> RolodexResult<ImportedFile> {
        Ok(self.importer().import_bytes(filename, bytes)?)
    }

    /// Lists processed files, most recent first.
    pub fn list_files(&self) -> RolodexResult<Vec<ProcessedFile>> {
        Ok(self.storage.list_files()?)
    }

    /// Deletes a file and its contacts. Returns the number of contacts removed.
    pub fn delete_file(&self, file_id: &str) -> RolodexResult<u64> {
        match self.storage.delete_file(file_id) {
            Err(crate::storage::StorageError::NotFound(what)) => Err(RolodexError::NotFound(what)),
            other => Ok(other?),
        }
    }

    // === Contacts ===

    /// Gets a contact by ID.
    pub fn get_contact(&self, id: &str) -> RolodexResult<Option<ContactRecord>> {
        Ok(self.storage.load_contact(id)?)
    }

    /// Lists the whole corpus, highest review count first.
    pub fn list_contacts(&self) -> RolodexResult<Vec<ContactRecord>> {
        let mut contacts = self.storage.list_contacts()?;
        sort_by_reviews(&mut contacts);
        Ok(contacts)
    }

    /// Lists one file's contacts, highest review count first.
    pub fn list_file_contacts(&self, file_id: &str) -> RolodexResult<Vec<ContactRecord>> {
        if self.storage.load_file(file_id)?.is_none() {
            return Err(RolodexError::NotFound(format!("file {}", file_id)));
        }
        let mut contacts = self.storage.list_contacts_for_file(file_id)?;
        sort_by_reviews(&mut contacts);
        Ok(contacts)
    }

    // === Duplicates ===

    /// Duplicate groups within one file.
    pub fn find_duplicates(&self, file_id: &str) -> RolodexResult<Vec<DuplicateGroup>> {
        DuplicateManager::new(&self.storage).find_in_file(file_id)
    }

    /// Duplicate groups across the whole corpus.
    pub fn find_corpus_duplicates(&self) -> RolodexResult<Vec<DuplicateGroup>> {
        DuplicateManager::new(&self.storage).find_in_corpus()
    }

    /// Number of duplicate groups within one file.
    pub fn duplicate_group_count(&self, file_id: &str) -> RolodexResult<usize> {
        Ok(self.find_duplicates(file_id)?.len())
    }

    /// Merges groups of contact ids; the first id of each group survives.
    pub fn merge_duplicates<G: AsRef<[String]>>(&self, groups: &[G]) -> RolodexResult<MergeReport> {
        DuplicateManager::new(&self.storage).merge(groups)
    }

    // === Similarity ===

    /// Records in other files sharing an email or phone with `file_id`'s records.
    pub fn find_similar_records(&self, file_id: &str) -> RolodexResult<SimilarRecords> {
        SimilarityFinder::new(&self.storage).find(file_id)
    }
}

/// Stable sort, so equal counts keep insertion order.
fn sort_by_reviews(contacts: &mut [ContactRecord]) {
    contacts.sort_by(|a, b| b.review_count.cmp(&a.review_count));
}
