//! Tests for RecordIterator
//!
//! These tests verify:
//! - has_next / next cursor behaviour
//! - Snapshot semantics (later writes are not seen)
//! - Read failures for records removed after listing
//! - The cursor advancing past a failed read

use std::collections::HashSet;
use std::fs;

use serde::{Deserialize, Serialize};
use snowstore::{SnowStore, StoreError};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Person {
    id: u32,
    name: String,
}

fn setup_store_with_people(parent: &str, ids: &[u32]) -> (TempDir, SnowStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = SnowStore::open_path(temp_dir.path()).unwrap();
    for id in ids {
        let p = Person {
            id: *id,
            name: format!("person-{}", id),
        };
        store.set(parent, &id.to_string(), &p).unwrap();
    }
    (temp_dir, store)
}

// =============================================================================
// Cursor Tests
// =============================================================================

#[test]
fn test_cursor_counts_down() {
    let (_temp, store) = setup_store_with_people("7", &[1, 2, 3]);

    let mut it = store.get_by_parent::<Person>("7").unwrap();
    assert_eq!(it.remaining(), 3);
    assert_eq!(it.len(), 3);

    let mut seen = 0;
    while it.has_next() {
        assert!(it.peek_path().is_some());
        it.next().unwrap().unwrap();
        seen += 1;
        assert_eq!(it.remaining(), 3 - seen);
    }

    assert_eq!(seen, 3);
    assert!(it.peek_path().is_none());
    assert!(it.next().is_none());
    assert!(it.next().is_none());
}

#[test]
fn test_paths_are_full_record_paths() {
    let (_temp, store) = setup_store_with_people("7", &[1, 2]);

    let it = store.get_by_parent::<Person>("7").unwrap();

    let paths: HashSet<_> = it.paths().iter().cloned().collect();
    let expected: HashSet<_> = [
        store.record_path("7", "1").unwrap(),
        store.record_path("7", "2").unwrap(),
    ]
    .into_iter()
    .collect();
    assert_eq!(paths, expected);
}

#[test]
fn test_records_match_written_values() {
    let (_temp, store) = setup_store_with_people("7", &[1, 2]);

    for record in store.get_by_parent::<Person>("7").unwrap() {
        let p = record.unwrap();
        assert_eq!(p.name, format!("person-{}", p.id));
    }
}

// =============================================================================
// Snapshot Tests
// =============================================================================

#[test]
fn test_later_writes_not_seen() {
    let (_temp, store) = setup_store_with_people("7", &[1]);

    let it = store.get_by_parent::<Person>("7").unwrap();
    store
        .set("7", "2", &Person { id: 2, name: "late".into() })
        .unwrap();

    let records: Vec<Person> = it.collect::<Result<_, _>>().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, 1);
}

#[test]
fn test_overwrite_after_listing_is_read() {
    let (_temp, store) = setup_store_with_people("7", &[1]);

    let mut it = store.get_by_parent::<Person>("7").unwrap();
    store
        .set("7", "1", &Person { id: 1, name: "renamed".into() })
        .unwrap();

    assert_eq!(it.next().unwrap().unwrap().name, "renamed");
}

#[test]
fn test_removed_record_fails_with_io() {
    let (_temp, store) = setup_store_with_people("7", &[1]);

    let mut it = store.get_by_parent::<Person>("7").unwrap();
    store.delete("7", "1").unwrap();

    assert!(it.has_next());
    let result = it.next().unwrap();
    assert!(matches!(result, Err(StoreError::Io(_))));
}

#[test]
fn test_cursor_advances_past_failure() {
    let (_temp, store) = setup_store_with_people("7", &[1, 2]);

    let mut it = store.get_by_parent::<Person>("7").unwrap();
    let first = it.peek_path().unwrap().to_path_buf();
    fs::write(&first, b"garbage").unwrap();

    assert!(matches!(it.next(), Some(Err(StoreError::Corruption(_)))));
    assert!(it.has_next());
    assert!(it.next().unwrap().is_ok());
    assert!(!it.has_next());
}

#[test]
fn test_namespace_deleted_after_listing() {
    let (_temp, store) = setup_store_with_people("7", &[1, 2]);

    let it = store.get_by_parent::<Person>("7").unwrap();
    store.delete_by_parent("7").unwrap();

    let results: Vec<_> = it.collect();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| matches!(r, Err(StoreError::Io(_)))));
}
