use crate::config::MemoryBackend;
use crate::core::properties::parse_properties;
use crate::core::types::CredentialEntry;
use crate::store::{CredentialStore, StoreError};
use std::fs;
use tempfile::TempDir;

fn sample_store() -> CredentialStore<MemoryBackend> {
    let mut store = CredentialStore::new(MemoryBackend::new());
    store.upsert(&CredentialEntry::new("http://example.com", "bob", "s3cret")).unwrap();
    store.upsert(&CredentialEntry::new("https://other.org/repo", "alice", "pw")).unwrap();
    store
}

#[test]
fn test_collect_export_keeps_stored_form() {
    let store = sample_store();

    let pairs = store.collect_export(&["http://example.com"]).unwrap();
    assert_eq!(
        pairs,
        vec![
            ("http://example.com!username".to_string(), "bob".to_string()),
            ("http://example.com!password".to_string(), "czNjcmV0".to_string()),
        ]
    );
}

#[test]
fn test_collect_export_skips_absent_subkeys() {
    let mut store = CredentialStore::new(MemoryBackend::new());
    store.import_pairs([("http://x!username", "bob")]).unwrap();

    let pairs = store.collect_export(&["http://x", "http://missing"]).unwrap();
    assert_eq!(pairs, vec![("http://x!username".to_string(), "bob".to_string())]);
}

#[test]
fn test_collect_export_deduplicates() {
    let store = sample_store();

    let pairs = store.collect_export(&["http://example.com", "http://example.com"]).unwrap();
    assert_eq!(pairs.len(), 2);
}

#[test]
fn test_export_to_file_counts_requested_urls() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("out.properties");
    let store = sample_store();

    let count = store
        .export_to_file(&["http://example.com", "http://missing", "http://example.com"], &path)
        .unwrap();
    assert_eq!(count, 2);

    let pairs = parse_properties(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(pairs.len(), 2, "Only keys that exist are written");
}

#[test]
fn test_export_file_round_trips_through_import() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("out.properties");

    let mut source = CredentialStore::new(MemoryBackend::new());
    let tricky = CredentialEntry::new("http://a!b.com/x=y", "名前 with=sign\nline", "p:ss#wörd!");
    source.upsert(&tricky).unwrap();
    source.export_to_file(&[tricky.url.as_str()], &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("#teamcreds export\n"));
    assert!(content.is_ascii());

    let mut target = CredentialStore::new(MemoryBackend::new());
    assert_eq!(target.import_file(&path).unwrap(), 1);
    assert_eq!(target.get(&tricky.url).unwrap().unwrap().into_entry(), tricky);
}

#[test]
fn test_export_into_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("no").join("such").join("dir.properties");

    let result = sample_store().export_to_file(&["http://example.com"], &path);
    assert!(matches!(result, Err(StoreError::File { .. })));
}
