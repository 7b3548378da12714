//! Import Workflow Integration Tests
//!
//! Tests for importing files, listing and deleting them.

use rolodex_core::{ImportError, Rolodex, RolodexConfig, RolodexError};

fn csv(lines: &[&str]) -> Vec<u8> {
    let mut out = lines.join("\n");
    out.push('\n');
    out.into_bytes()
}

/// Test: import, list, delete
#[test]
fn test_file_lifecycle() {
    let rolodex = Rolodex::in_memory().unwrap();

    let first = rolodex
        .import_bytes("first.csv", &csv(&["name,reviews", "Low,1", "High,50", "Mid,7"]))
        .unwrap();
    let second = rolodex
        .import_bytes("second.csv", &csv(&["name", "Other"]))
        .unwrap();

    assert_eq!(rolodex.list_files().unwrap().len(), 2);

    // Highest review count first
    let names: Vec<String> = rolodex
        .list_file_contacts(&first.file.id)
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["High", "Mid", "Low"]);
    assert_eq!(rolodex.list_contacts().unwrap().len(), 4);

    // Deleting a file removes its contacts
    assert_eq!(rolodex.delete_file(&first.file.id).unwrap(), 3);
    assert_eq!(rolodex.list_contacts().unwrap().len(), 1);
    assert!(matches!(
        rolodex.delete_file(&first.file.id),
        Err(RolodexError::NotFound(_))
    ));
    assert!(matches!(
        rolodex.list_file_contacts(&first.file.id),
        Err(RolodexError::NotFound(_))
    ));

    // The same content can be imported again once its file is gone
    rolodex
        .import_bytes("first-again.csv", &csv(&["name,reviews", "Low,1", "High,50", "Mid,7"]))
        .unwrap();
    assert_eq!(rolodex.list_files().unwrap().len(), 2);
    assert!(rolodex.list_files().unwrap().iter().any(|f| f.id == second.file.id));
}

/// Test: configured upload limit applies
#[test]
fn test_upload_limit_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config =
        RolodexConfig::with_storage_path(dir.path().join("nested").join("contacts.db"))
            .with_max_upload_size(16);
    let rolodex = Rolodex::open(config).unwrap();

    let result = rolodex.import_bytes("big.csv", &csv(&["email", "someone@example.com"]));

    assert!(matches!(
        result,
        Err(RolodexError::Import(ImportError::FileTooLarge { .. }))
    ));
    assert!(dir.path().join("nested").join("contacts.db").exists());
}

/// Test: a second handle on the same file sees committed imports
#[test]
fn test_reopen_sees_imports() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.db");

    let file_id = {
        let rolodex = Rolodex::open(RolodexConfig::with_storage_path(&path)).unwrap();
        rolodex
            .import_bytes("a.csv", &csv(&["email", "a@b.com"]))
            .unwrap()
            .file
            .id
    };

    let rolodex = Rolodex::open(RolodexConfig::with_storage_path(&path)).unwrap();
    let contacts = rolodex.list_file_contacts(&file_id).unwrap();
    assert_eq!(contacts.len(), 1);
    assert!(rolodex.get_contact(&contacts[0].id).unwrap().is_some());
}
