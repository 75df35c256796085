#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use adsieve_core::AdvertiseInfo;
use adsieve_gateway::lists::AdvertiseLists;
use adsieve_gateway::store::{load_json, save_json, CorruptPolicy, FileStore, KvStore, MemoryStore};

fn info(white: &[&str], black: &[&str]) -> AdvertiseInfo {
    AdvertiseInfo::new(
        white.iter().map(|s| s.to_string()).collect(),
        black.iter().map(|s| s.to_string()).collect(),
    )
}

#[test]
fn save_then_load_round_trips() {
    let store = MemoryStore::new();
    save_json(&store, "K", &info(&["a"], &["b"])).unwrap();

    let got: AdvertiseInfo = load_json(&store, "K", AdvertiseInfo::default(), CorruptPolicy::Fallback).unwrap();
    assert_eq!(got, info(&["a"], &["b"]));
}

#[test]
fn persisted_shape_uses_list_member_names() {
    let store = MemoryStore::new();
    save_json(&store, "K", &info(&["a"], &["b"])).unwrap();
    let raw = store.get("K").unwrap().unwrap();
    assert_eq!(raw, r#"{"whiteList":["a"],"blackList":["b"]}"#);
}

#[test]
fn absent_or_empty_returns_default() {
    let store = MemoryStore::new();
    let fallback = info(&["x"], &[]);
    let got = load_json(&store, "missing", fallback.clone(), CorruptPolicy::Error).unwrap();
    assert_eq!(got, fallback);

    store.set("blank", String::new()).unwrap();
    let got = load_json(&store, "blank", fallback.clone(), CorruptPolicy::Error).unwrap();
    assert_eq!(got, fallback);
}

#[test]
fn corrupt_value_follows_policy() {
    let store = MemoryStore::new();
    store.set("K", "{not json".into()).unwrap();

    let got = load_json(&store, "K", AdvertiseInfo::default(), CorruptPolicy::Fallback).unwrap();
    assert_eq!(got, AdvertiseInfo::default());

    let err = load_json(&store, "K", AdvertiseInfo::default(), CorruptPolicy::Error).unwrap_err();
    assert_eq!(err.client_code().as_str(), "STORAGE");
}

#[test]
fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = FileStore::open(dir.path()).unwrap();
        save_json(&store, "YouTubeAdvertiseInfo", &info(&[], &["pagead/x"])).unwrap();
    }

    let store = FileStore::open(dir.path()).unwrap();
    let got: AdvertiseInfo =
        load_json(&store, "YouTubeAdvertiseInfo", AdvertiseInfo::default(), CorruptPolicy::Error).unwrap();
    assert_eq!(got.black_list, vec!["pagead/x".to_string()]);
    assert!(dir.path().join("YouTubeAdvertiseInfo.json").exists());
    assert!(!dir.path().join("YouTubeAdvertiseInfo.json.tmp").exists());
}

#[test]
fn file_store_missing_key_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path().join("nested")).unwrap();
    assert!(store.get("nothing").unwrap().is_none());
}

#[test]
fn rejects_path_like_keys() {
    let store = MemoryStore::new();
    for key in ["", "../x", "a/b", ".hidden"] {
        assert!(store.set(key, "{}".into()).is_err(), "key={key:?}");
    }
}

#[test]
fn list_appends_persist_and_dedupe() {
    let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
    let lists = AdvertiseLists::new(Arc::clone(&store), "YouTubeAdvertiseInfo", CorruptPolicy::Fallback);

    assert!(lists.deny("pagead/x").unwrap());
    assert!(!lists.deny("pagead/x").unwrap());
    assert!(lists.allow("safe").unwrap());

    // a fresh registry over the same store sees the writes
    let again = AdvertiseLists::new(store, "YouTubeAdvertiseInfo", CorruptPolicy::Fallback);
    assert_eq!(again.snapshot().unwrap(), info(&["safe"], &["pagead/x"]));
}

#[test]
fn list_rejects_blank_entries() {
    let lists = AdvertiseLists::new(Arc::new(MemoryStore::new()), "K", CorruptPolicy::Fallback);
    let err = lists.allow("   ").unwrap_err();
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn append_refuses_to_overwrite_corrupt_blob() {
    let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
    let corrupt = r#"{"whiteList":["a","b","c"],"blackList":["pagead/1","pagead/2",]}"#;
    store.set("YouTubeAdvertiseInfo", corrupt.into()).unwrap();

    let lists = AdvertiseLists::new(Arc::clone(&store), "YouTubeAdvertiseInfo", CorruptPolicy::Fallback);

    let err = lists.deny("pagead/3").unwrap_err();
    assert_eq!(err.client_code().as_str(), "STORAGE");
    let err = lists.allow("safe").unwrap_err();
    assert_eq!(err.client_code().as_str(), "STORAGE");
    assert_eq!(store.get("YouTubeAdvertiseInfo").unwrap().as_deref(), Some(corrupt));

    // reads still fall back
    assert_eq!(lists.snapshot().unwrap(), AdvertiseInfo::default());
}
