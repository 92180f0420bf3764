// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use tempfile::tempdir;

fn sorted(mut keys: Vec<String>) -> Vec<String> {
    keys.sort();
    keys
}

#[test]
fn file_store_get_missing_is_none() {
    let dir = tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    assert_eq!(store.get("feed:user:u1:page:0").unwrap(), None);
}

#[test]
fn file_store_set_get_overwrite() {
    let dir = tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();

    store.set("user:u1", "{\"v\":1}").unwrap();
    assert_eq!(store.get("user:u1").unwrap().as_deref(), Some("{\"v\":1}"));

    store.set("user:u1", "{\"v\":2}").unwrap();
    assert_eq!(store.get("user:u1").unwrap().as_deref(), Some("{\"v\":2}"));
}

#[test]
fn file_store_leaves_no_temp_files() {
    let dir = tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    store.set("topics:all", "[]").unwrap();

    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].ends_with(".json"));
}

#[test]
fn file_store_remove_is_idempotent() {
    let dir = tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();

    store.set("community:4", "{}").unwrap();
    store.remove("community:4").unwrap();
    store.remove("community:4").unwrap();
    assert_eq!(store.get("community:4").unwrap(), None);
}

#[test]
fn file_store_keys_round_trip_and_skip_foreign_files() {
    let dir = tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    store.set("feed:user:u1:page:0", "[]").unwrap();
    store.set("offline_write_queue", "[]").unwrap();
    std::fs::write(dir.path().join("README.txt"), "not a record").unwrap();
    std::fs::write(dir.path().join("zz.json"), "not hex").unwrap();

    assert_eq!(
        sorted(store.keys().unwrap()),
        vec!["feed:user:u1:page:0".to_string(), "offline_write_queue".to_string()]
    );
}

#[test]
fn file_store_survives_reopen() {
    let dir = tempdir().unwrap();
    {
        let store = FileStore::open(dir.path()).unwrap();
        store.set("offline_write_queue", "[1,2]").unwrap();
    }
    let store = FileStore::open(dir.path()).unwrap();
    assert_eq!(
        store.get("offline_write_queue").unwrap().as_deref(),
        Some("[1,2]")
    );
}

#[test]
fn file_store_long_key_round_trip() {
    let dir = tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    let long = format!("communities:search:{}", "a".repeat(300));

    store.set(&long, "[1]").unwrap();
    store.set("user:u1", "{}").unwrap();

    assert_eq!(store.get(&long).unwrap().as_deref(), Some("[1]"));
    assert_eq!(
        sorted(store.keys().unwrap()),
        vec![long.clone(), "user:u1".to_string()]
    );
    for entry in std::fs::read_dir(dir.path()).unwrap() {
        assert!(entry.unwrap().file_name().len() < 255);
    }

    store.remove(&long).unwrap();
    assert_eq!(store.get(&long).unwrap(), None);
    assert_eq!(store.keys().unwrap(), vec!["user:u1".to_string()]);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn file_store_keys_near_the_hashing_threshold_stay_distinct() {
    let dir = tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    let at_limit = "b".repeat(100);
    let over_limit = "b".repeat(101);

    store.set(&at_limit, "1").unwrap();
    store.set(&over_limit, "2").unwrap();

    assert_eq!(store.get(&at_limit).unwrap().as_deref(), Some("1"));
    assert_eq!(store.get(&over_limit).unwrap().as_deref(), Some("2"));
    assert_eq!(sorted(store.keys().unwrap()), vec![at_limit, over_limit]);
}

#[test]
fn file_store_concurrent_writes_to_one_key() {
    let dir = tempdir().unwrap();
    let store = std::sync::Arc::new(FileStore::open(dir.path()).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let store = store.clone();
            std::thread::spawn(move || {
                for i in 0..25 {
                    store.set("feed:user:u1:page:0", &format!("[{n},{i}]")).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert!(store.get("feed:user:u1:page:0").unwrap().is_some());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn file_store_rejects_empty_key() {
    let dir = tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    assert!(matches!(store.set("", "x"), Err(Error::InvalidKey(_))));
}

#[test]
fn memory_store_basic_operations() {
    let store = MemoryStore::new();
    store.set("a", "1").unwrap();
    store.set("b", "2").unwrap();
    store.remove("a").unwrap();

    assert_eq!(store.get("a").unwrap(), None);
    assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    assert_eq!(store.keys().unwrap(), vec!["b".to_string()]);
}
