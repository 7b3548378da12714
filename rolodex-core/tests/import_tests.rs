// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for spreadsheet import

mod common;

use std::fs;

use common::{create_test_storage, csv_bytes};
use rolodex_core::import::{map_columns, ColumnTarget};
use rolodex_core::*;

#[test]
fn test_import_csv_bytes() {
    let storage = create_test_storage();
    let bytes = csv_bytes(&[
        "Name,E-mail,Email,Phone Number,Reviews,Rating",
        "Cafe Aurora,x,aurora@mail.com,+1 555 0101,120,4.7",
        "Bar Nord,,nord@mail.com,,3,",
    ]);

    let imported = Importer::new(&storage).import_bytes("leads.csv", &bytes).unwrap();

    assert_eq!(imported.file.filename, "leads.csv");
    assert_eq!(imported.file.row_count, 2);
    assert_eq!(imported.file.file_size, bytes.len() as u64);
    assert_eq!(imported.file.file_hash.len(), 64);
    assert_eq!(
        imported.columns,
        vec!["name", "e-mail", "email", "phone_number", "reviews", "rating"]
    );
    assert_eq!(imported.file.original_columns[3], "Phone Number");

    let contacts = storage.list_contacts_for_file(&imported.file.id).unwrap();
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0].name, "Cafe Aurora");
    assert_eq!(contacts[0].email, "aurora@mail.com");
    assert_eq!(contacts[0].phone, "+1 555 0101");
    assert_eq!(contacts[0].review_count, 120);
    assert_eq!(contacts[0].extra_fields.get("rating").map(String::as_str), Some("4.7"));
    assert_eq!(contacts[0].extra_fields.get("e-mail").map(String::as_str), Some("x"));
    assert!(contacts[1].extra_fields.get("rating").is_none());
}

#[test]
fn test_import_russian_headers() {
    let storage = create_test_storage();
    let bytes = csv_bytes(&[
        "Название,Телефон,Город,Примечания",
        "Кофейня,8 (495) 000-00-00,Москва,звонить утром",
    ]);

    let imported = Importer::new(&storage).import_bytes("список.csv", &bytes).unwrap();
    let contacts = storage.list_contacts_for_file(&imported.file.id).unwrap();

    assert_eq!(contacts[0].name, "Кофейня");
    assert_eq!(contacts[0].phone_key(), "84950000000");
    assert_eq!(contacts[0].city, "Москва");
    assert_eq!(contacts[0].notes, "звонить утром");
}

#[test]
fn test_import_strips_bom_and_skips_blank_rows() {
    let storage = create_test_storage();
    let mut bytes = b"\xEF\xBB\xBF".to_vec();
    bytes.extend(csv_bytes(&["email,name", "a@b.com,A", ",", "c@d.com,C"]));

    let imported = Importer::new(&storage).import_bytes("bom.txt", &bytes).unwrap();

    assert_eq!(imported.columns[0], "email");
    assert_eq!(imported.file.row_count, 2);
}

#[test]
fn test_import_same_content_twice_is_rejected() {
    let storage = create_test_storage();
    let bytes = csv_bytes(&["email", "a@b.com"]);
    let importer = Importer::new(&storage);

    importer.import_bytes("first.csv", &bytes).unwrap();
    let result = importer.import_bytes("renamed.csv", &bytes);

    assert!(matches!(result, Err(ImportError::AlreadyProcessed(name)) if name == "first.csv"));
    assert_eq!(storage.list_files().unwrap().len(), 1);
    assert_eq!(storage.contact_count().unwrap(), 1);
}

#[test]
fn test_import_unsupported_extension() {
    let storage = create_test_storage();
    let result = Importer::new(&storage).import_bytes("contacts.pdf", b"%PDF");
    assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
}

#[test]
fn test_import_too_large() {
    let storage = create_test_storage();
    let bytes = csv_bytes(&["email", "a@b.com", "c@d.com"]);

    let result = Importer::new(&storage)
        .with_max_file_size(8)
        .import_bytes("big.csv", &bytes);

    assert!(matches!(result, Err(ImportError::FileTooLarge { limit: 8, .. })));
    assert_eq!(storage.contact_count().unwrap(), 0);
}

#[test]
fn test_import_invalid_excel_is_parse_error() {
    let storage = create_test_storage();
    let result = Importer::new(&storage).import_bytes("broken.xlsx", b"not a workbook");
    assert!(matches!(result, Err(ImportError::Parse(_))));
    assert!(storage.list_files().unwrap().is_empty());
}

#[test]
fn test_import_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leads.csv");
    fs::write(&path, csv_bytes(&["name,phone", "Ann,555"])).unwrap();
    let storage = create_test_storage();

    let imported = Importer::new(&storage).import_path(&path).unwrap();

    assert_eq!(imported.file.filename, "leads.csv");
    assert_eq!(storage.list_contacts_for_file(&imported.file.id).unwrap().len(), 1);
}

#[test]
fn test_import_missing_path_is_io_error() {
    let storage = create_test_storage();
    let result = Importer::new(&storage).import_path(std::path::Path::new("/no/such/file.csv"));
    assert!(matches!(result, Err(ImportError::Io(_))));
}

#[test]
fn test_first_alias_wins() {
    let headers: Vec<String> = vec!["Phone".into(), "Mobile".into(), "".into()];
    let targets = map_columns(&headers);

    assert_eq!(targets[0], ColumnTarget::Field(ContactField::Phone));
    assert_eq!(targets[1], ColumnTarget::Extra("mobile".into()));
    assert_eq!(targets[2], ColumnTarget::Ignored);
}
