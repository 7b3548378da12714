// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cross-file similarity.
//!
//! Read-only lookup of records in other files that share a normalized email
//! or phone with any record of a given file.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::contact::{ContactRecord, MatchType};
use crate::storage::Storage;

use super::error::{RolodexError, RolodexResult};

/// An external record that shares a key with the inspected file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimilarMatch {
    #[serde(flatten)]
    pub record: ContactRecord,
    pub match_type: MatchType,
}

impl SimilarMatch {
    /// File the matched record came from.
    pub fn file_id(&self) -> Option<&str> {
        self.record.file_id.as_deref()
    }
}

/// Everything needed to review one file against the rest of the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimilarRecords {
    /// The inspected file's own records.
    pub own_records: Vec<ContactRecord>,
    /// External matches; each record appears once.
    pub matches: Vec<SimilarMatch>,
    /// File id to filename, for every file referenced by `matches`.
    pub file_names: BTreeMap<String, String>,
}

/// Finds records in other files that look like a file's records.
pub struct SimilarityFinder<'a> {
    storage: &'a Storage,
}

impl<'a> SimilarityFinder<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        SimilarityFinder { storage }
    }

    /// Fails with `NotFound` if the file has no records.
    pub fn find(&self, file_id: &str) -> RolodexResult<SimilarRecords> {
        let own_records = self.storage.list_contacts_for_file(file_id)?;
        if own_records.is_empty() {
            return Err(RolodexError::NotFound(format!("no contacts for file {}", file_id)));
        }

        let email_keys = distinct_keys(&own_records, MatchType::Email);
        let phone_keys = distinct_keys(&own_records, MatchType::Phone);

        let by_email = if email_keys.is_empty() {
            Vec::new()
        } else {
            self.storage.find_contacts_by_email_keys(&email_keys, file_id)?
        };
        let by_phone = if phone_keys.is_empty() {
            Vec::new()
        } else {
            self.storage.find_contacts_by_phone_keys(&phone_keys, file_id)?
        };

        // Email matches first, then phone: the first tag seen for a record wins
        let mut seen: HashSet<String> = HashSet::new();
        let mut matches = Vec::new();
        let tagged = by_email
            .into_iter()
            .map(|r| (r, MatchType::Email))
            .chain(by_phone.into_iter().map(|r| (r, MatchType::Phone)));
        for (record, match_type) in tagged {
            if seen.insert(record.id.clone()) {
                matches.push(SimilarMatch { record, match_type });
            }
        }

        let mut file_ids: Vec<String> = matches
            .iter()
            .filter_map(|m| m.file_id().map(str::to_string))
            .collect();
        file_ids.sort();
        file_ids.dedup();
        let file_names = self.storage.file_names(&file_ids)?;

        debug!(
            file_id,
            own = own_records.len(),
            matches = matches.len(),
            "found similar records"
        );

        Ok(SimilarRecords {
            own_records,
            matches,
            file_names,
        })
    }
}

/// Non-empty keys of one kind, in first-seen order.
fn distinct_keys(records: &[ContactRecord], match_type: MatchType) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|r| r.match_key(match_type))
        .filter(|k| !k.is_empty() && seen.insert(k.clone()))
        .collect()
}
