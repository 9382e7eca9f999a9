//! Tests for Config
//!
//! These tests verify:
//! - Default values
//! - Builder overrides
//! - Validation

use std::path::PathBuf;

use snowstore::config::{Config, WriteMode};
use snowstore::StoreError;

#[test]
fn test_defaults() {
    let config = Config::default();

    assert_eq!(config.base_dir, PathBuf::from("./snowstore"));
    assert_eq!(config.dir_mode, 0o774);
    assert_eq!(config.write_mode, WriteMode::Direct);
    assert!(!config.sync_writes);
    assert!(config.validate().is_ok());
}

#[test]
fn test_builder_overrides() {
    let config = Config::builder()
        .base_dir("/tmp/snow")
        .dir_mode(0o700)
        .write_mode(WriteMode::Atomic)
        .sync_writes(true)
        .build();

    assert_eq!(config.base_dir, PathBuf::from("/tmp/snow"));
    assert_eq!(config.dir_mode, 0o700);
    assert_eq!(config.write_mode, WriteMode::Atomic);
    assert!(config.sync_writes);
}

#[test]
fn test_validate_rejects_empty_base_dir() {
    let config = Config::builder().base_dir("").build();

    let err = config.validate().unwrap_err();
    assert!(matches!(err, StoreError::Config(_)));
    assert!(err.to_string().contains("base_dir"));
}

#[cfg(unix)]
#[test]
fn test_dir_mode_applied() {
    use std::os::unix::fs::PermissionsExt;

    use snowstore::SnowStore;
    use tempfile::TempDir;

    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .base_dir(temp_dir.path())
        .dir_mode(0o700)
        .build();
    let store = SnowStore::open(config).unwrap();

    store.set("p", "k", &1u32).unwrap();

    let mode = std::fs::metadata(store.parent_dir("p").unwrap())
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o700);
}
