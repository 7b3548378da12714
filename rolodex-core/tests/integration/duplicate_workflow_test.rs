//! Duplicate Workflow Integration Tests
//!
//! Tests for finding, merging and cross-checking duplicates.

use rolodex_core::{MatchType, Rolodex, RolodexError};

fn csv(lines: &[&str]) -> Vec<u8> {
    let mut out = lines.join("\n");
    out.push('\n');
    out.into_bytes()
}

/// Test: review duplicates in one file and merge them
#[test]
fn test_find_and_merge_workflow() {
    let rolodex = Rolodex::in_memory().unwrap();
    let imported = rolodex
        .import_bytes(
            "leads.csv",
            &csv(&[
                "name,email,phone,city,reviews,notes",
                "Cafe Aurora,aurora@mail.com,,Riga,10,",
                "Aurora Cafe,AURORA@mail.com,+371 200 00000,Jurmala,25,terrace",
                "Bar Nord,,8 800 555,,,",
                "Nord Bar,,8800555,,,",
                "Loner,loner@mail.com,,,,",
            ]),
        )
        .unwrap();
    let file_id = imported.file.id;

    let groups = rolodex.find_duplicates(&file_id).unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].match_type, MatchType::Email);
    assert_eq!(groups[1].match_type, MatchType::Phone);
    assert_eq!(rolodex.duplicate_group_count(&file_id).unwrap(), 2);

    let ids: Vec<Vec<String>> = groups.iter().map(|g| g.ids()).collect();
    let report = rolodex.merge_duplicates(&ids).unwrap();
    assert_eq!(report.groups_merged, 2);
    assert_eq!(report.records_deleted, 2);

    let aurora = rolodex.get_contact(&ids[0][0]).unwrap().unwrap();
    assert!(aurora.merged);
    assert_eq!(aurora.name, "Cafe Aurora");
    assert_eq!(aurora.phone, "+371 200 00000");
    assert_eq!(aurora.city, "Riga");
    assert_eq!(aurora.review_count, 25);
    assert_eq!(
        aurora.notes,
        "Merged name: Aurora Cafe\nMerged email: AURORA@mail.com\nMerged city: Jurmala\nMerged notes: terrace"
    );
    assert!(rolodex.get_contact(&ids[0][1]).unwrap().is_none());

    assert_eq!(rolodex.duplicate_group_count(&file_id).unwrap(), 0);
    assert_eq!(rolodex.list_file_contacts(&file_id).unwrap().len(), 3);
}

/// Test: duplicates across files
#[test]
fn test_corpus_and_similarity_workflow() {
    let rolodex = Rolodex::in_memory().unwrap();
    let first = rolodex
        .import_bytes("first.csv", &csv(&["email,phone", "a@b.com,111", "c@d.com,"]))
        .unwrap();
    let second = rolodex
        .import_bytes("second.csv", &csv(&["email,phone", "A@B.COM,", ",111", "x@y.com,"]))
        .unwrap();

    // Within each file there is nothing to merge
    assert!(rolodex.find_duplicates(&first.file.id).unwrap().is_empty());
    assert!(rolodex.find_duplicates(&second.file.id).unwrap().is_empty());

    // Across the corpus the email group claims the first record
    let corpus = rolodex.find_corpus_duplicates().unwrap();
    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus[0].key, "a@b.com");

    // Similarity reports both external records, each once
    let similar = rolodex.find_similar_records(&first.file.id).unwrap();
    assert_eq!(similar.own_records.len(), 2);
    assert_eq!(similar.matches.len(), 2);
    let tags: Vec<MatchType> = similar.matches.iter().map(|m| m.match_type).collect();
    assert_eq!(tags, vec![MatchType::Email, MatchType::Phone]);
    assert_eq!(
        similar.file_names.get(&second.file.id).map(String::as_str),
        Some("second.csv")
    );
}

/// Test: empty inputs
#[test]
fn test_empty_cases() {
    let rolodex = Rolodex::in_memory().unwrap();

    assert!(rolodex.find_corpus_duplicates().unwrap().is_empty());
    assert!(matches!(
        rolodex.find_duplicates("missing"),
        Err(RolodexError::NotFound(_))
    ));
    assert!(matches!(
        rolodex.find_similar_records("missing"),
        Err(RolodexError::NotFound(_))
    ));

    let empty: Vec<Vec<String>> = Vec::new();
    let report = rolodex.merge_duplicates(&empty).unwrap();
    assert_eq!(report.groups_merged, 0);
}
