// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Column-name mapping.
//!
//! Spreadsheet headers vary between sources and languages. Each header is
//! cleaned, then matched against a fixed alias table.

use crate::contact::ContactField;

/// Where a spreadsheet column lands on a contact record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnTarget {
    Field(ContactField),
    Notes,
    ReviewCount,
    /// Kept verbatim in the record's extra fields under the cleaned header.
    Extra(String),
    /// Blank header; the column is dropped.
    Ignored,
}

const FIELD_ALIASES: &[(ContactField, &[&str])] = &[
    (
        ContactField::Category,
        &["category", "категория", "cat", "type", "тип"],
    ),
    (
        ContactField::Name,
        &[
            "name",
            "fullname",
            "full_name",
            "contact_name",
            "person",
            "заведение",
            "название",
            "имя",
        ],
    ),
    (
        ContactField::Email,
        &[
            "email",
            "email_address",
            "emailaddress",
            "mail",
            "почта",
            "эл_почта",
            "электронная_почта",
        ],
    ),
    (
        ContactField::Phone,
        &[
            "phone",
            "phone_number",
            "phonenumber",
            "telephone",
            "mobile",
            "cell",
            "телефон",
            "номер",
            "тел",
        ],
    ),
    (
        ContactField::Facebook,
        &["facebook", "fb", "facebook_url", "fb_url", "фейсбук"],
    ),
    (
        ContactField::Website,
        &["website", "site", "web", "url", "сайт", "веб-сайт", "web_site"],
    ),
    (
        ContactField::City,
        &["city", "town", "город", "населенный_пункт", "нас_пункт"],
    ),
    (
        ContactField::Address,
        &["address", "location", "full_address", "адрес", "местоположение"],
    ),
    (
        ContactField::Company,
        &[
            "company",
            "organization",
            "business_name",
            "company_name",
            "компания",
            "организация",
            "фирма",
        ],
    ),
    (
        ContactField::Position,
        &["position", "title", "job_title", "должность", "позиция", "роль"],
    ),
];

const NOTES_ALIASES: &[&str] = &["notes", "note", "примечания", "заметки"];

const REVIEW_COUNT_ALIASES: &[&str] = &["review_count", "reviews", "отзывы"];

/// Lowercases, trims and replaces spaces with underscores.
pub fn clean_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// Classifies a single cleaned header.
fn classify(cleaned: &str) -> ColumnTarget {
    if cleaned.is_empty() {
        return ColumnTarget::Ignored;
    }
    if let Some((field, _)) = FIELD_ALIASES
        .iter()
        .find(|(_, aliases)| aliases.contains(&cleaned))
    {
        return ColumnTarget::Field(*field);
    }
    if NOTES_ALIASES.contains(&cleaned) {
        return ColumnTarget::Notes;
    }
    if REVIEW_COUNT_ALIASES.contains(&cleaned) {
        return ColumnTarget::ReviewCount;
    }
    ColumnTarget::Extra(cleaned.to_string())
}

/// Maps a header row to column targets.
///
/// When several headers map to the same standard target, the first one
/// wins and later ones are kept as extra fields.
pub fn map_columns(headers: &[String]) -> Vec<ColumnTarget> {
    let mut taken: Vec<ColumnTarget> = Vec::new();

    headers
        .iter()
        .map(|header| {
            let cleaned = clean_header(header);
            let target = classify(&cleaned);
            match target {
                ColumnTarget::Extra(_) | ColumnTarget::Ignored => target,
                standard if taken.contains(&standard) => ColumnTarget::Extra(cleaned),
                standard => {
                    taken.push(standard.clone());
                    standard
                }
            }
        })
        .collect()
}
