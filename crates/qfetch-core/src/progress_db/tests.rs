//! Tests for progress_db (in-memory store helper from db, temp dirs for files).

use crate::progress_db::db::open_memory;
use crate::progress_db::{validate_job_name, JobStores, ProgressStore};

#[tokio::test]
async fn get_put_roundtrip() {
    let store = open_memory().await.unwrap();
    assert_eq!(store.get("https://h/a.m3u8").await.unwrap(), None);

    store.put("https://h/a.m3u8", "a.m3u8").await.unwrap();
    assert_eq!(
        store.get("https://h/a.m3u8").await.unwrap().as_deref(),
        Some("a.m3u8")
    );
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn match_requires_same_key() {
    let store = open_memory().await.unwrap();
    store.put("https://h/a.m3u8", "old/a.m3u8").await.unwrap();
    assert!(store.is_recorded("https://h/a.m3u8", "old/a.m3u8").await.unwrap());
    assert!(!store.is_recorded("https://h/a.m3u8", "new/a.m3u8").await.unwrap());
    assert!(!store.is_recorded("https://h/b.m3u8", "old/a.m3u8").await.unwrap());
}

#[tokio::test]
async fn put_overwrites_and_is_idempotent() {
    let store = open_memory().await.unwrap();
    store.put("u", "k1").await.unwrap();
    store.put("u", "k1").await.unwrap();
    store.put("u", "k2").await.unwrap();
    assert_eq!(store.get("u").await.unwrap().as_deref(), Some("k2"));
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("job.db");
    {
        let store = ProgressStore::open_at(&path).await.unwrap();
        store.put("https://h/s.ts", "s.ts").await.unwrap();
        store.close().await;
    }
    let store = ProgressStore::open_at(&path).await.unwrap();
    assert!(store.is_recorded("https://h/s.ts", "s.ts").await.unwrap());
}

#[tokio::test]
async fn job_stores_are_named_after_job_and_independent() {
    let dir = tempfile::tempdir().unwrap();
    let stores = JobStores::open(dir.path(), "nightly").await.unwrap();
    stores.succeeded.put("u1", "k1").await.unwrap();
    stores.not_found.put("u2", "k2").await.unwrap();

    assert!(dir.path().join("nightly.job.db").exists());
    assert!(dir.path().join("nightly.404.job.db").exists());
    assert_eq!(stores.succeeded.get("u2").await.unwrap(), None);
    assert_eq!(stores.not_found.get("u1").await.unwrap(), None);
    stores.close().await;

    let other = JobStores::open(dir.path(), "other").await.unwrap();
    assert_eq!(other.succeeded.count().await.unwrap(), 0);
    other.close().await;
}

#[tokio::test]
async fn remove_deletes_job_files() {
    let dir = tempfile::tempdir().unwrap();
    let stores = JobStores::open(dir.path(), "j").await.unwrap();
    stores.succeeded.put("u", "k").await.unwrap();
    stores.close().await;
    assert!(JobStores::exists(dir.path(), "j"));

    let removed = JobStores::remove(dir.path(), "j").await.unwrap();
    assert!(removed >= 2);
    assert!(!JobStores::exists(dir.path(), "j"));
    assert_eq!(JobStores::remove(dir.path(), "j").await.unwrap(), 0);
}

#[test]
fn job_names_cannot_escape_state_dir() {
    assert!(validate_job_name("nightly-2024").is_ok());
    assert!(validate_job_name("").is_err());
    assert!(validate_job_name("..").is_err());
    assert!(validate_job_name("a/b").is_err());
    assert!(validate_job_name("a\\b").is_err());
}
