// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for storage

mod common;

use common::{create_test_storage, processed_file, record, seed_file};
use rolodex_core::*;

#[test]
fn test_storage_save_load_contact() {
    let storage = create_test_storage();
    let mut contact = record("f1", "Alice", "alice@example.com", "+1 555 0100");
    contact.review_count = 12;
    contact.extra_fields.insert("rating".into(), "4.8".into());
    let id = contact.id.clone();

    storage.save_contact(&contact).unwrap();
    let loaded = storage.load_contact(&id).unwrap().unwrap();

    assert_eq!(loaded, contact);
}

#[test]
fn test_storage_load_missing_contact() {
    let storage = create_test_storage();
    assert!(storage.load_contact("nope").unwrap().is_none());
}

#[test]
fn test_storage_update_keeps_listing_order() {
    let storage = create_test_storage();
    let first = record("f", "First", "", "");
    let second = record("f", "Second", "", "");
    storage.save_contact(&first).unwrap();
    storage.save_contact(&second).unwrap();

    let mut updated = first.clone();
    updated.name = "First (edited)".into();
    storage.save_contact(&updated).unwrap();

    let names: Vec<String> = storage
        .list_contacts()
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["First (edited)", "Second"]);
}

#[test]
fn test_storage_list_contacts_for_file() {
    let storage = create_test_storage();
    storage.save_contact(&record("f1", "A", "", "")).unwrap();
    storage.save_contact(&record("f2", "B", "", "")).unwrap();
    storage.save_contact(&record("f1", "C", "", "")).unwrap();

    let names: Vec<String> = storage
        .list_contacts_for_file("f1")
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["A", "C"]);
    assert_eq!(storage.contact_count().unwrap(), 3);
}

#[test]
fn test_storage_delete_contact() {
    let storage = create_test_storage();
    let contact = record("f", "A", "", "");
    storage.save_contact(&contact).unwrap();

    assert!(storage.delete_contact(&contact.id).unwrap());
    assert!(!storage.delete_contact(&contact.id).unwrap());
    assert!(storage.load_contact(&contact.id).unwrap().is_none());
}

#[test]
fn test_storage_key_lookup_excludes_own_file() {
    let storage = create_test_storage();
    storage.save_contact(&record("f1", "Own", "a@b.com", "")).unwrap();
    storage.save_contact(&record("f2", "Other", "A@B.com ", "")).unwrap();
    storage.save_contact(&record("f3", "Unrelated", "z@z.com", "")).unwrap();

    let found = storage
        .find_contacts_by_email_keys(&["a@b.com".to_string()], "f1")
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Other");
}

#[test]
fn test_storage_key_lookup_skips_records_without_file() {
    let storage = create_test_storage();
    let mut loose = record("x", "Loose", "", "12345");
    loose.file_id = None;
    storage.save_contact(&loose).unwrap();
    storage.save_contact(&record("f2", "Filed", "", "123-45")).unwrap();

    let found = storage
        .find_contacts_by_phone_keys(&["12345".to_string()], "f1")
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Filed");
}

#[test]
fn test_storage_key_lookup_handles_many_keys() {
    let storage = create_test_storage();
    for i in 0..1200 {
        storage
            .save_contact(&record("other", "", &format!("u{}@x.com", i), ""))
            .unwrap();
    }
    let keys: Vec<String> = (0..1200).map(|i| format!("u{}@x.com", i)).collect();

    let found = storage.find_contacts_by_email_keys(&keys, "mine").unwrap();
    assert_eq!(found.len(), 1200);
}

#[test]
fn test_storage_save_load_file() {
    let storage = create_test_storage();
    let file = processed_file("f1", "leads.csv");
    storage.save_file(&file).unwrap();

    assert_eq!(storage.load_file("f1").unwrap(), Some(file.clone()));
    assert_eq!(storage.find_file_by_hash(&file.file_hash).unwrap(), Some(file));
    assert!(storage.load_file("f2").unwrap().is_none());
}

#[test]
fn test_storage_rejects_duplicate_hash() {
    let storage = create_test_storage();
    let first = processed_file("f1", "a.csv");
    let mut second = processed_file("f2", "b.csv");
    second.file_hash = first.file_hash.clone();

    storage.save_file(&first).unwrap();
    let result = storage.save_file(&second);
    assert!(matches!(result, Err(StorageError::AlreadyExists(_))));
}

#[test]
fn test_storage_list_files_newest_first() {
    let storage = create_test_storage();
    let mut old = processed_file("old", "old.csv");
    old.processed_at = 100;
    let mut new = processed_file("new", "new.csv");
    new.processed_at = 200;
    storage.save_file(&old).unwrap();
    storage.save_file(&new).unwrap();

    let ids: Vec<String> = storage.list_files().unwrap().into_iter().map(|f| f.id).collect();
    assert_eq!(ids, vec!["new", "old"]);
}

#[test]
fn test_storage_delete_file_removes_contacts() {
    let storage = create_test_storage();
    seed_file(
        &storage,
        "f1",
        "a.csv",
        &[record("f1", "A", "", ""), record("f1", "B", "", "")],
    );
    seed_file(&storage, "f2", "b.csv", &[record("f2", "C", "", "")]);

    assert_eq!(storage.delete_file("f1").unwrap(), 2);
    assert!(storage.load_file("f1").unwrap().is_none());
    assert_eq!(storage.contact_count().unwrap(), 1);
}

#[test]
fn test_storage_delete_missing_file() {
    let storage = create_test_storage();
    assert!(matches!(storage.delete_file("nope"), Err(StorageError::NotFound(_))));
}

#[test]
fn test_storage_file_names() {
    let storage = create_test_storage();
    storage.save_file(&processed_file("f1", "a.csv")).unwrap();
    storage.save_file(&processed_file("f2", "b.xlsx")).unwrap();

    let names = storage
        .file_names(&["f2".to_string(), "missing".to_string()])
        .unwrap();
    assert_eq!(names.len(), 1);
    assert_eq!(names.get("f2").map(String::as_str), Some("b.xlsx"));
}

#[test]
fn test_transaction_rolls_back_on_error() {
    let storage = create_test_storage();
    let contact = record("f", "A", "", "");

    let result: Result<(), StorageError> = storage.with_transaction(|s| {
        s.save_contact(&contact)?;
        Err(StorageError::InvalidData("stop".into()))
    });

    assert!(result.is_err());
    assert_eq!(storage.contact_count().unwrap(), 0);
}

#[test]
fn test_storage_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.db");
    let contact = record("f", "Persisted", "p@x.com", "");

    {
        let storage = Storage::open(&path).unwrap();
        storage.save_contact(&contact).unwrap();
    }

    let storage = Storage::open(&path).unwrap();
    assert_eq!(storage.path(), Some(path.as_path()));
    assert_eq!(storage.load_contact(&contact.id).unwrap(), Some(contact));
}
