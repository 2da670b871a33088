// tests/file_backend_tests.rs
mod common;

use common::*;
use serial_test::serial;
use storefront::catalog::DEFAULT_RECORD_NAME;
use storefront::{default_catalog, CatalogBackend, CatalogStore, FileBackend};

#[test]
#[serial]
fn test_missing_file_reads_as_no_record() {
  setup_tracing();
  let dir = tempfile::tempdir().unwrap();
  let backend = FileBackend::new(dir.path(), DEFAULT_RECORD_NAME);
  assert!(backend.read().unwrap().is_none());
  assert!(backend.path().ends_with("mcr_products_db_v1.json"));
}

#[test]
#[serial]
fn test_store_survives_reopen() {
  setup_tracing();
  let dir = tempfile::tempdir().unwrap();
  let data_dir = dir.path().join("nested").join("data");

  {
    let store = CatalogStore::new(FileBackend::new(&data_dir, DEFAULT_RECORD_NAME));
    store.initialize().unwrap();
    store.save(draft("Persisted", 4200)).unwrap();
    store.delete(1).unwrap();
  }

  let reopened = CatalogStore::new(FileBackend::new(&data_dir, DEFAULT_RECORD_NAME));
  reopened.initialize().unwrap();
  let products = reopened.list_all();
  assert_eq!(products.len(), 12);
  assert!(reopened.get(1).is_none());
  assert_eq!(reopened.get(13).unwrap().name, "Persisted");
}

#[test]
#[serial]
fn test_corrupt_file_reads_empty_until_reset() {
  setup_tracing();
  let dir = tempfile::tempdir().unwrap();
  let backend = FileBackend::new(dir.path(), "catalog");
  std::fs::write(backend.path(), b"<html>").unwrap();

  let store = CatalogStore::new(backend.clone());
  store.initialize().unwrap();
  assert!(store.list_all().is_empty());

  store.reset().unwrap();
  assert_eq!(store.list_all(), default_catalog());
  assert!(!dir.path().join("catalog.json.tmp").exists());
}

#[test]
#[serial]
fn test_unwritable_location_is_backend_error() {
  setup_tracing();
  let dir = tempfile::tempdir().unwrap();
  let blocker = dir.path().join("blocker");
  std::fs::write(&blocker, b"").unwrap();

  // A regular file where the directory should be.
  let store = CatalogStore::new(FileBackend::new(&blocker, "catalog"));
  assert!(matches!(
    store.initialize(),
    Err(storefront::StoreError::Backend { operation: "initialize", .. })
  ));
}
