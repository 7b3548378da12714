// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contact storage operations.

use rusqlite::{params, params_from_iter, Row};

use super::{Storage, StorageError};
use crate::contact::{ContactRecord, ExtraFields};

/// Upper bound on keys bound into one `IN (...)` query.
const KEY_CHUNK_SIZE: usize = 500;

const CONTACT_COLUMNS: &str = "id, file_id, category, name, email, phone, facebook, website,
     city, address, company, position, review_count, notes, extra_fields_json, merged,
     created_at";

/// Internal struct for database row data.
struct ContactRow {
    record: ContactRecord,
    extra_fields_json: Option<String>,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<ContactRow> {
    let text = |idx: usize| -> rusqlite::Result<String> {
        Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
    };

    let record = ContactRecord {
        id: row.get(0)?,
        file_id: row.get(1)?,
        category: text(2)?,
        name: text(3)?,
        email: text(4)?,
        phone: text(5)?,
        facebook: text(6)?,
        website: text(7)?,
        city: text(8)?,
        address: text(9)?,
        company: text(10)?,
        position: text(11)?,
        review_count: row.get::<_, i64>(12)?.clamp(0, u32::MAX as i64) as u32,
        notes: text(13)?,
        extra_fields: ExtraFields::new(),
        merged: row.get::<_, i32>(15)? != 0,
        created_at: row.get::<_, i64>(16)?.max(0) as u64,
    };

    Ok(ContactRow {
        record,
        extra_fields_json: row.get(14)?,
    })
}

/// Maps an empty string to SQL NULL.
pub(super) fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl Storage {
    // === Contact Operations ===

    /// Saves a contact, inserting it or updating the existing row.
    ///
    /// Match keys are recomputed from the stored email and phone on every
    /// save. Updating keeps the row's original position in listings.
    pub fn save_contact(&self, contact: &ContactRecord) -> Result<(), StorageError> {
        let extra_json = if contact.extra_fields.is_empty() {
            None
        } else {
            Some(
                serde_json::to_string(&contact.extra_fields)
                    .map_err(|e| StorageError::Serialization(e.to_string()))?,
            )
        };
        let email_key = contact.email_key();
        let phone_key = contact.phone_key();

        self.conn.execute(
            "INSERT INTO contacts
             (id, file_id, category, name, email, phone, facebook, website, city, address,
              company, position, review_count, notes, extra_fields_json, merged, created_at,
              email_key, phone_key)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
                     ?17, ?18, ?19)
             ON CONFLICT(id) DO UPDATE SET
                file_id = excluded.file_id,
                category = excluded.category,
                name = excluded.name,
                email = excluded.email,
                phone = excluded.phone,
                facebook = excluded.facebook,
                website = excluded.website,
                city = excluded.city,
                address = excluded.address,
                company = excluded.company,
                position = excluded.position,
                review_count = excluded.review_count,
                notes = excluded.notes,
                extra_fields_json = excluded.extra_fields_json,
                merged = excluded.merged,
                created_at = excluded.created_at,
                email_key = excluded.email_key,
                phone_key = excluded.phone_key",
            params![
                contact.id,
                contact.file_id,
                non_empty(&contact.category),
                non_empty(&contact.name),
                non_empty(&contact.email),
                non_empty(&contact.phone),
                non_empty(&contact.facebook),
                non_empty(&contact.website),
                non_empty(&contact.city),
                non_empty(&contact.address),
                non_empty(&contact.company),
                non_empty(&contact.position),
                contact.review_count as i64,
                non_empty(&contact.notes),
                extra_json,
                contact.merged as i32,
                contact.created_at as i64,
                non_empty(&email_key),
                non_empty(&phone_key),
            ],
        )?;

        Ok(())
    }

    /// Loads a contact by ID.
    pub fn load_contact(&self, id: &str) -> Result<Option<ContactRecord>, StorageError> {
        let sql = format!("SELECT {} FROM contacts WHERE id = ?1", CONTACT_COLUMNS);
        let result = self.conn.query_row(&sql, params![id], read_row);

        match result {
            Ok(row) => Ok(Some(row_to_contact(row)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StorageError::Database(e)),
        }
    }

    /// Lists every contact in the corpus, in insertion order.
    pub fn list_contacts(&self) -> Result<Vec<ContactRecord>, StorageError> {
        let sql = format!("SELECT {} FROM contacts ORDER BY rowid", CONTACT_COLUMNS);
        self.query_contacts(&sql, [])
    }

    /// Lists the contacts imported from one file, in insertion order.
    pub fn list_contacts_for_file(&self, file_id: &str) -> Result<Vec<ContactRecord>, StorageError> {
        let sql = format!(
            "SELECT {} FROM contacts WHERE file_id = ?1 ORDER BY rowid",
            CONTACT_COLUMNS
        );
        self.query_contacts(&sql, params![file_id])
    }

    /// Counts contacts in the corpus.
    pub fn contact_count(&self) -> Result<u64, StorageError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Deletes a contact by ID. Returns false if it did not exist.
    pub fn delete_contact(&self, id: &str) -> Result<bool, StorageError> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1", params![id])?;
        Ok(rows_affected > 0)
    }

    /// Finds contacts in other files whose email key is in `keys`.
    /// Contacts without a file are never returned.
    pub fn find_contacts_by_email_keys(
        &self,
        keys: &[String],
        exclude_file_id: &str,
    ) -> Result<Vec<ContactRecord>, StorageError> {
        self.find_by_key_column("email_key", keys, exclude_file_id)
    }

    /// Finds contacts in other files whose phone key is in `keys`.
    pub fn find_contacts_by_phone_keys(
        &self,
        keys: &[String],
        exclude_file_id: &str,
    ) -> Result<Vec<ContactRecord>, StorageError> {
        self.find_by_key_column("phone_key", keys, exclude_file_id)
    }

    fn find_by_key_column(
        &self,
        column: &'static str,
        keys: &[String],
        exclude_file_id: &str,
    ) -> Result<Vec<ContactRecord>, StorageError> {
        let keys: Vec<&str> = keys.iter().map(String::as_str).filter(|k| !k.is_empty()).collect();
        let mut found = Vec::new();

        // A record has one key per column, so chunks never return it twice.
        for chunk in keys.chunks(KEY_CHUNK_SIZE) {
            let placeholders = (0..chunk.len())
                .map(|i| format!("?{}", i + 2))
                .collect::<Vec<_>>()
                .join(", ");
            let sql = format!(
                "SELECT {} FROM contacts
                 WHERE file_id IS NOT NULL AND file_id != ?1 AND {} IN ({})
                 ORDER BY rowid",
                CONTACT_COLUMNS, column, placeholders
            );
            let params = std::iter::once(exclude_file_id).chain(chunk.iter().copied());
            found.extend(self.query_contacts(&sql, params_from_iter(params))?);
        }

        Ok(found)
    }

    fn query_contacts<P: rusqlite::Params>(
        &self,
        sql: &str,
        params: P,
    ) -> Result<Vec<ContactRecord>, StorageError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, read_row)?;

        let mut contacts = Vec::new();
        for row_result in rows {
            contacts.push(row_to_contact(row_result?)?);
        }
        Ok(contacts)
    }
}

/// Converts a database row to a ContactRecord.
fn row_to_contact(row: ContactRow) -> Result<ContactRecord, StorageError> {
    let mut record = row.record;
    if let Some(json) = row.extra_fields_json {
        record.extra_fields =
            serde_json::from_str(&json).map_err(|e| StorageError::Serialization(e.to_string()))?;
    }
    Ok(record)
}
