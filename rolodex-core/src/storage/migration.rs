// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Schema migrations for the contact store.
//!
//! `schema_version` records every applied step. Opening a store applies the
//! steps above the recorded maximum, all under one exclusive transaction.

use rusqlite::Connection;
use tracing::debug;

use crate::contact::{normalize_email, normalize_phone, unix_now};

use super::StorageError;

/// One numbered schema step.
pub struct Migration {
    /// Steps apply in ascending order, starting at 1.
    pub version: u32,
    pub name: &'static str,
    pub action: MigrationAction,
}

pub enum MigrationAction {
    Sql(&'static str),
    /// Row rewrites that need Rust, e.g. running the normalizers.
    Callback(fn(&Connection) -> Result<(), StorageError>),
}

/// Applies pending steps to a connection.
pub struct MigrationRunner;

impl MigrationRunner {
    /// Brings the store up to the last step in `migrations`.
    ///
    /// Nothing is recorded unless every pending step succeeds.
    pub fn run(conn: &Connection, migrations: &[Migration]) -> Result<(), StorageError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY,
                applied_at INTEGER NOT NULL
            );",
        )?;

        let applied = Self::current_version(conn)?;
        let pending: Vec<&Migration> = migrations.iter().filter(|m| m.version > applied).collect();
        if pending.is_empty() {
            return Ok(());
        }
        if let Some(pair) = pending.windows(2).find(|w| w[0].version >= w[1].version) {
            return Err(StorageError::Migration(format!(
                "v{} is listed before v{}",
                pair[0].version, pair[1].version
            )));
        }

        conn.execute_batch("BEGIN EXCLUSIVE TRANSACTION;")?;
        for migration in &pending {
            if let Err(e) = Self::apply(conn, migration) {
                conn.execute_batch("ROLLBACK;")?;
                return Err(e);
            }
        }
        conn.execute_batch("COMMIT;")?;

        debug!(from = applied, steps = pending.len(), "schema upgraded");
        Ok(())
    }

    fn apply(conn: &Connection, migration: &Migration) -> Result<(), StorageError> {
        debug!(version = migration.version, name = migration.name, "applying migration");

        let step = match &migration.action {
            MigrationAction::Sql(sql) => conn.execute_batch(sql).map_err(StorageError::from),
            MigrationAction::Callback(callback) => callback(conn),
        };
        step.map_err(|e| {
            StorageError::Migration(format!("v{} {}: {}", migration.version, migration.name, e))
        })?;

        conn.execute(
            "INSERT INTO schema_version (version, applied_at) VALUES (?1, ?2)",
            rusqlite::params![migration.version, unix_now() as i64],
        )
        .map_err(|e| {
            StorageError::Migration(format!("recording v{}: {}", migration.version, e))
        })?;
        Ok(())
    }

    /// Highest applied version; 0 for a store that predates `schema_version`.
    pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
        let tracked: bool = conn.query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'",
            [],
            |row| row.get(0),
        )?;
        if !tracked {
            return Ok(0);
        }

        let version: Option<u32> =
            conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
        Ok(version.unwrap_or(0))
    }
}

/// The contact store's schema steps. Append new steps; never renumber.
pub fn all_migrations() -> Vec<Migration> {
    vec![
        Migration {
            version: 1,
            name: "baseline_schema",
            action: MigrationAction::Sql(MIGRATION_V1_BASELINE),
        },
        Migration {
            version: 2,
            name: "match_key_columns",
            action: MigrationAction::Sql(MIGRATION_V2_MATCH_KEYS),
        },
        Migration {
            version: 3,
            name: "backfill_match_keys",
            action: MigrationAction::Callback(migrate_v3_backfill_match_keys),
        },
    ]
}

const MIGRATION_V1_BASELINE: &str = "
CREATE TABLE IF NOT EXISTS processed_files (
    id TEXT PRIMARY KEY,
    filename TEXT NOT NULL,
    file_size INTEGER NOT NULL,
    file_hash TEXT NOT NULL UNIQUE,
    processed_at INTEGER NOT NULL,
    row_count INTEGER NOT NULL,
    original_columns_json TEXT
);

CREATE TABLE IF NOT EXISTS contacts (
    id TEXT PRIMARY KEY,
    file_id TEXT,
    category TEXT,
    name TEXT,
    email TEXT,
    phone TEXT,
    facebook TEXT,
    website TEXT,
    city TEXT,
    address TEXT,
    company TEXT,
    position TEXT,
    review_count INTEGER NOT NULL DEFAULT 0,
    notes TEXT,
    extra_fields_json TEXT,
    merged INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_contacts_file_id ON contacts(file_id);
";

const MIGRATION_V2_MATCH_KEYS: &str = "
ALTER TABLE contacts ADD COLUMN email_key TEXT;
ALTER TABLE contacts ADD COLUMN phone_key TEXT;

CREATE INDEX IF NOT EXISTS idx_contacts_email_key ON contacts(email_key);
CREATE INDEX IF NOT EXISTS idx_contacts_phone_key ON contacts(phone_key);
";

/// Migration v3: compute match keys for rows stored before v2.
fn migrate_v3_backfill_match_keys(conn: &Connection) -> Result<(), StorageError> {
    let mut stmt = conn.prepare("SELECT id, email, phone FROM contacts")?;
    let rows: Vec<(String, Option<String>, Option<String>)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    for (id, email, phone) in &rows {
        let email_key = normalize_email(email.as_deref().unwrap_or_default());
        let phone_key = normalize_phone(phone.as_deref().unwrap_or_default());
        conn.execute(
            "UPDATE contacts SET email_key = ?1, phone_key = ?2 WHERE id = ?3",
            rusqlite::params![
                super::contacts::non_empty(&email_key),
                super::contacts::non_empty(&phone_key),
                id
            ],
        )?;
    }

    debug!(rows = rows.len(), "backfilled match keys");
    Ok(())
}
