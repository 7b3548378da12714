// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Duplicate Detection
//!
//! Partitions contact records into duplicate-candidate groups by exact
//! normalized email and phone keys. Email groups are emitted first; a
//! record placed in any emitted group is never placed again.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{ContactRecord, MatchType};

/// Records believed to denote the same real-world contact.
///
/// The first record is the merge primary by convention of construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Key kind that formed this group.
    pub match_type: MatchType,
    /// The shared normalized key.
    pub key: String,
    pub records: Vec<ContactRecord>,
}

impl DuplicateGroup {
    /// The designated survivor.
    pub fn primary(&self) -> Option<&ContactRecord> {
        self.records.first()
    }

    /// Record identifiers in group order.
    pub fn ids(&self) -> Vec<String> {
        self.records.iter().map(|r| r.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Buckets records by key, remembering the order keys were first seen.
struct KeyBuckets<'a> {
    order: Vec<String>,
    buckets: HashMap<String, Vec<&'a ContactRecord>>,
}

impl<'a> KeyBuckets<'a> {
    fn build(records: &'a [ContactRecord], match_type: MatchType) -> Self {
        let mut order = Vec::new();
        let mut buckets: HashMap<String, Vec<&'a ContactRecord>> = HashMap::new();

        for record in records {
            let key = record.match_key(match_type);
            if key.is_empty() {
                continue;
            }
            buckets
                .entry(key)
                .or_insert_with_key(|k| {
                    order.push(k.clone());
                    Vec::new()
                })
                .push(record);
        }

        KeyBuckets { order, buckets }
    }

    fn into_ordered(self) -> impl Iterator<Item = (String, Vec<&'a ContactRecord>)> {
        let KeyBuckets { order, mut buckets } = self;
        order.into_iter().filter_map(move |key| {
            let members = buckets.remove(&key)?;
            Some((key, members))
        })
    }
}

/// Finds duplicate-candidate groups among `records`.
///
/// Only groups of two or more records are returned. A key bucket is emitted
/// only if none of its members was already placed by an earlier group, so
/// an email match takes precedence over a phone match.
pub fn find_duplicates(records: &[ContactRecord]) -> Vec<DuplicateGroup> {
    let mut placed: HashSet<&str> = HashSet::new();
    let mut groups = Vec::new();

    for match_type in [MatchType::Email, MatchType::Phone] {
        for (key, members) in KeyBuckets::build(records, match_type).into_ordered() {
            if members.len() < 2 {
                continue;
            }
            if members.iter().any(|&r| placed.contains(r.id.as_str())) {
                continue;
            }
            placed.extend(members.iter().map(|&r| r.id.as_str()));
            groups.push(DuplicateGroup {
                match_type,
                key,
                records: members.into_iter().cloned().collect(),
            });
        }
    }

    groups
}
