// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Duplicate Manager
//!
//! Finds duplicate groups in stored contacts and merges client-supplied
//! groups back into the store.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::contact::{absorb, find_duplicates, DuplicateGroup};
use crate::storage::Storage;

use super::error::{RolodexError, RolodexResult};

/// Result of a merge batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Groups whose primary absorbed its members.
    pub groups_merged: usize,
    /// Groups with fewer than two ids or a primary that no longer exists.
    pub groups_skipped: usize,
    /// Member records removed from the store.
    pub records_deleted: usize,
    /// Primary ids of merged groups, in input order.
    pub survivors: Vec<String>,
}

/// Finds and merges duplicate contacts.
pub struct DuplicateManager<'a> {
    storage: &'a Storage,
}

impl<'a> DuplicateManager<'a> {
    /// Creates a new DuplicateManager.
    pub fn new(storage: &'a Storage) -> Self {
        DuplicateManager { storage }
    }

    /// Groups the records of one imported file.
    ///
    /// Fails with `NotFound` if the file has no records.
    pub fn find_in_file(&self, file_id: &str) -> RolodexResult<Vec<DuplicateGroup>> {
        let records = self.storage.list_contacts_for_file(file_id)?;
        if records.is_empty() {
            return Err(RolodexError::NotFound(format!("no contacts for file {}", file_id)));
        }

        let groups = find_duplicates(&records);
        debug!(file_id, records = records.len(), groups = groups.len(), "grouped file");
        Ok(groups)
    }

    /// Groups every record in the corpus. An empty corpus has no groups.
    pub fn find_in_corpus(&self) -> RolodexResult<Vec<DuplicateGroup>> {
        let records = self.storage.list_contacts()?;
        Ok(find_duplicates(&records))
    }

    /// Merges each group into its first member.
    ///
    /// Every group is validated before anything is written. Each group is
    /// then committed atomically: a storage failure rolls back the failing
    /// group, stops the batch, and leaves earlier groups committed.
    pub fn merge<G: AsRef<[String]>>(&self, groups: &[G]) -> RolodexResult<MergeReport> {
        for (index, group) in groups.iter().enumerate() {
            validate_group(index, group.as_ref())?;
        }

        let mut report = MergeReport::default();

        for group in groups {
            let ids = group.as_ref();
            if ids.len() < 2 {
                report.groups_skipped += 1;
                continue;
            }

            match self.merge_group(ids) {
                Ok(Some(deleted)) => {
                    report.groups_merged += 1;
                    report.records_deleted += deleted;
                    report.survivors.push(ids[0].clone());
                }
                Ok(None) => report.groups_skipped += 1,
                Err(e) => {
                    error!(
                        primary = %ids[0],
                        merged_so_far = report.groups_merged,
                        "merge aborted: {}",
                        e
                    );
                    return Err(e);
                }
            }
        }

        info!(
            merged = report.groups_merged,
            skipped = report.groups_skipped,
            deleted = report.records_deleted,
            "merge batch complete"
        );
        Ok(report)
    }

    /// Merges one group in a transaction. Returns the number of members
    /// deleted, or `None` if the primary no longer exists.
    fn merge_group(&self, ids: &[String]) -> RolodexResult<Option<usize>> {
        self.storage
            .with_transaction(|storage| -> RolodexResult<Option<usize>> {
                let Some(mut primary) = storage.load_contact(&ids[0])? else {
                    warn!(primary = %ids[0], "primary missing, skipping group");
                    return Ok(None);
                };
                primary.merged = true;
                let notes_before = primary.notes.clone();

                let mut deleted = 0;
                for member_id in &ids[1..] {
                    let Some(member) = storage.load_contact(member_id)? else {
                        debug!(member = %member_id, "member already gone");
                        continue;
                    };

                    let outcome = absorb(&mut primary, &member, &notes_before);
                    debug!(
                        primary = %primary.id,
                        member = %member.id,
                        adopted = outcome.adopted.len(),
                        discarded = outcome.discarded.len() + outcome.discarded_extra.len(),
                        "absorbed member"
                    );

                    storage.delete_contact(member_id)?;
                    deleted += 1;
                }

                storage.save_contact(&primary)?;
                Ok(Some(deleted))
            })
    }
}

/// Rejects groups that cannot be merged safely.
///
/// Groups shorter than two are allowed through and skipped later.
fn validate_group(index: usize, ids: &[String]) -> RolodexResult<()> {
    if ids.len() < 2 {
        return Ok(());
    }

    let mut seen = HashSet::new();
    for (position, id) in ids.iter().enumerate() {
        if id.trim().is_empty() {
            let role = if position == 0 { "primary" } else { "member" };
            return Err(RolodexError::Validation(format!(
                "group {}: {} at position {} has no contact id",
                index, role, position
            )));
        }
        if !seen.insert(id.as_str()) {
            return Err(RolodexError::Validation(format!(
                "group {}: contact {} listed twice",
                index, id
            )));
        }
    }
    Ok(())
}
