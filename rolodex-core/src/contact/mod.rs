// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contact Module
//!
//! Contact records imported from spreadsheets, the normalized keys used to
//! compare them, and the duplicate grouping and merge rules built on top.

pub mod grouping;
pub mod merge;
pub mod normalize;

pub use grouping::{find_duplicates, DuplicateGroup};
pub use merge::{absorb, MergeOutcome};
pub use normalize::{normalize_email, normalize_phone};

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Spreadsheet columns that did not map to a standard field, keyed by
/// their cleaned header name.
pub type ExtraFields = BTreeMap<String, String>;

/// The ten semantic string fields every contact carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Category,
    Name,
    Email,
    Phone,
    /// Social-profile URL.
    Facebook,
    Website,
    City,
    Address,
    Company,
    Position,
}

impl ContactField {
    /// All fields in merge order.
    pub const ALL: [ContactField; 10] = [
        ContactField::Category,
        ContactField::Name,
        ContactField::Email,
        ContactField::Phone,
        ContactField::Facebook,
        ContactField::Website,
        ContactField::City,
        ContactField::Address,
        ContactField::Company,
        ContactField::Position,
    ];

    /// Canonical column name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::Category => "category",
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Phone => "phone",
            ContactField::Facebook => "facebook",
            ContactField::Website => "website",
            ContactField::City => "city",
            ContactField::Address => "address",
            ContactField::Company => "company",
            ContactField::Position => "position",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContactField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("unknown contact field: {}", s))
    }
}

/// Which normalized key two records share.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Email,
    Phone,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Email => "email",
            MatchType::Phone => "phone",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of an uploaded contact list.
///
/// Absent values are stored as empty strings; an empty string never
/// produces a match key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: String,
    /// Upload batch that produced this record, if any.
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub facebook: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub extra_fields: ExtraFields,
    /// Set once this record has survived a merge as the primary.
    #[serde(default)]
    pub merged: bool,
    /// Unix timestamp (seconds).
    #[serde(default)]
    pub created_at: u64,
}

impl ContactRecord {
    /// Creates an empty record with a fresh UUID and the current timestamp.
    pub fn new() -> Self {
        ContactRecord {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: unix_now(),
            ..Default::default()
        }
    }

    /// Creates an empty record belonging to an upload batch.
    pub fn for_file(file_id: impl Into<String>) -> Self {
        ContactRecord {
            file_id: Some(file_id.into()),
            ..Self::new()
        }
    }

    /// Returns the value of a semantic field.
    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Category => &self.category,
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::Facebook => &self.facebook,
            ContactField::Website => &self.website,
            ContactField::City => &self.city,
            ContactField::Address => &self.address,
            ContactField::Company => &self.company,
            ContactField::Position => &self.position,
        }
    }

    /// Returns a mutable reference to a semantic field.
    pub fn field_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Category => &mut self.category,
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
            ContactField::Facebook => &mut self.facebook,
            ContactField::Website => &mut self.website,
            ContactField::City => &mut self.city,
            ContactField::Address => &mut self.address,
            ContactField::Company => &mut self.company,
            ContactField::Position => &mut self.position,
        }
    }

    /// Builder-style setter for a semantic field.
    pub fn with_field(mut self, field: ContactField, value: impl Into<String>) -> Self {
        *self.field_mut(field) = value.into();
        self
    }

    /// Normalized email key (empty if the record has no usable email).
    pub fn email_key(&self) -> String {
        normalize_email(&self.email)
    }

    /// Normalized phone key (empty if the phone contains no digits).
    pub fn phone_key(&self) -> String {
        normalize_phone(&self.phone)
    }

    /// Returns the key of the given kind.
    pub fn match_key(&self, match_type: MatchType) -> String {
        match match_type {
            MatchType::Email => self.email_key(),
            MatchType::Phone => self.phone_key(),
        }
    }

    /// Appends a line to the notes field.
    pub fn append_note(&mut self, line: &str) {
        if !self.notes.is_empty() {
            self.notes.push('\n');
        }
        self.notes.push_str(line);
    }
}

/// Metadata about an imported spreadsheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedFile {
    pub id: String,
    pub filename: String,
    pub file_size: u64,
    /// SHA-256 of the file content, hex encoded.
    pub file_hash: String,
    /// Unix timestamp (seconds).
    pub processed_at: u64,
    pub row_count: u64,
    /// Header row as it appeared in the file.
    pub original_columns: Vec<String>,
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
