// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contact Merge
//!
//! Folds a duplicate record into a primary. Nothing is lost: a value the
//! primary lacks is adopted, a conflicting value is recorded in the
//! primary's notes.

use super::{ContactField, ContactRecord};

/// What happened while absorbing one member into a primary.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Fields the primary was missing and took from the member.
    pub adopted: Vec<ContactField>,
    /// Conflicting member values written to the primary's notes.
    pub discarded: Vec<(ContactField, String)>,
    /// Extra-field keys the primary took from the member.
    pub adopted_extra: Vec<String>,
    /// Conflicting member extra fields written to the primary's notes.
    pub discarded_extra: Vec<(String, String)>,
    /// Whether the member's notes were appended.
    pub notes_appended: bool,
    /// Whether the primary's review count increased.
    pub review_count_raised: bool,
}

impl MergeOutcome {
    /// True if the primary was not changed at all.
    pub fn is_noop(&self) -> bool {
        self.adopted.is_empty()
            && self.discarded.is_empty()
            && self.adopted_extra.is_empty()
            && self.discarded_extra.is_empty()
            && !self.notes_appended
            && !self.review_count_raised
    }
}

/// Absorbs `member` into `primary`.
///
/// For each semantic field in [`ContactField::ALL`] order, a non-empty
/// member value that differs from the primary's current value is adopted
/// when the primary's value is empty, otherwise appended to the notes as
/// `Merged <field>: <value>`. The review count becomes the maximum of both.
/// Member notes are appended as `Merged notes: <notes>` unless they equal
/// `notes_before`, the primary's notes from before its group merge began.
/// Lines appended for earlier members therefore never make a member's
/// notes look new.
///
/// Does not touch the `merged` flag or delete anything; the caller owns
/// record lifecycle.
pub fn absorb(
    primary: &mut ContactRecord,
    member: &ContactRecord,
    notes_before: &str,
) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    for field in ContactField::ALL {
        let incoming = member.field(field);
        if incoming.is_empty() || incoming == primary.field(field) {
            continue;
        }
        if primary.field(field).is_empty() {
            *primary.field_mut(field) = incoming.to_string();
            outcome.adopted.push(field);
        } else {
            primary.append_note(&format!("Merged {}: {}", field, incoming));
            outcome.discarded.push((field, incoming.to_string()));
        }
    }

    for (key, incoming) in &member.extra_fields {
        if incoming.is_empty() {
            continue;
        }
        match primary.extra_fields.get(key) {
            Some(current) if current == incoming => {}
            Some(current) if !current.is_empty() => {
                primary.append_note(&format!("Merged {}: {}", key, incoming));
                outcome.discarded_extra.push((key.clone(), incoming.clone()));
            }
            _ => {
                primary.extra_fields.insert(key.clone(), incoming.clone());
                outcome.adopted_extra.push(key.clone());
            }
        }
    }

    if member.review_count > primary.review_count {
        primary.review_count = member.review_count;
        outcome.review_count_raised = true;
    }

    if !member.notes.is_empty() && member.notes != notes_before {
        primary.append_note(&format!("Merged notes: {}", member.notes));
        outcome.notes_appended = true;
    }

    outcome
}
