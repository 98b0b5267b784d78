use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use apiproxy_store::{MemoryStore, Store, StoreError};

#[test]
fn register_rejects_existing_key() {
    let store = MemoryStore::new("test");
    store.register("x", 1).unwrap();
    assert_eq!(store.register("x", 2), Err(StoreError::AlreadyExists("x".to_string())));
    assert_eq!(store.lookup("x").unwrap(), 1);
}

#[test]
fn lookup_missing_key_is_not_found() {
    let store: MemoryStore<String> = MemoryStore::new("test");
    assert_eq!(store.lookup("nope"), Err(StoreError::NotFound("nope".to_string())));
    assert!(!store.exists("nope"));
}

#[test]
fn set_overwrites_and_delete_removes() {
    let store = MemoryStore::new("test");
    store.set("k", "a".to_string());
    store.set("k", "b".to_string());
    assert_eq!(store.lookup("k").unwrap(), "b");
    store.delete("k");
    assert!(store.lookup("k").is_err());
    assert!(store.is_empty());
}

#[test]
fn expired_entry_reads_as_absent_but_stays_until_rewritten() {
    let store = MemoryStore::new("test");
    store.set_with_ttl("x", 1, Duration::from_millis(20));
    assert_eq!(store.lookup("x").unwrap(), 1);

    std::thread::sleep(Duration::from_millis(40));
    assert_eq!(store.lookup("x"), Err(StoreError::NotFound("x".to_string())));
    assert!(!store.exists("x"));
    assert!(store.keys().is_empty());
    // Lazy expiry: the entry is still physically present.
    assert_eq!(store.len(), 1);

    // An expired key can be registered again, replacing the stale entry.
    store.register("x", 2).unwrap();
    assert_eq!(store.lookup("x").unwrap(), 2);
    assert_eq!(store.len(), 1);
}

#[test]
fn keys_are_sorted_and_clear_empties_the_store() {
    let store = MemoryStore::new("test");
    store.set("b", 2);
    store.set("a", 1);
    store.set("c", 3);
    assert_eq!(store.keys(), ["a", "b", "c"]);
    assert_eq!(store.name(), "test");

    store.clear();
    assert!(store.keys().is_empty());
    assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn get_or_compute_loads_once_then_serves_cached_value() {
    let store = MemoryStore::new("test");
    let calls = AtomicUsize::new(0);

    for _ in 0..3 {
        let v = store
            .get_or_compute("k", None, |key| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { Ok::<_, String>(format!("value-of-{key}")) }
            })
            .await
            .unwrap();
        assert_eq!(v, "value-of-k");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn get_or_compute_reloads_after_ttl() {
    let store = MemoryStore::new("test");
    let calls = AtomicUsize::new(0);
    let load = |_: String| {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        async move { Ok::<_, String>(n) }
    };

    let v1 = store.get_or_compute("k", Some(Duration::from_millis(20)), load).await.unwrap();
    tokio::time::sleep(Duration::from_millis(40)).await;
    let v2 = store.get_or_compute("k", Some(Duration::from_millis(20)), load).await.unwrap();
    assert_ne!(v1, v2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn get_or_compute_does_not_store_loader_errors() {
    let store: MemoryStore<u32> = MemoryStore::new("test");
    let err = store
        .get_or_compute("k", None, |_| async { Err::<u32, _>("boom".to_string()) })
        .await
        .unwrap_err();
    assert_eq!(err, "boom");
    assert!(store.is_empty());
}

#[tokio::test]
async fn get_or_compute_may_run_loader_for_each_concurrent_miss() {
    let store = Arc::new(MemoryStore::new("test"));
    let calls = Arc::new(AtomicUsize::new(0));
    let gate = Arc::new(tokio::sync::Barrier::new(2));

    let mut handles = Vec::new();
    for _ in 0..2 {
        let store = store.clone();
        let calls = calls.clone();
        let gate = gate.clone();
        handles.push(tokio::spawn(async move {
            store
                .get_or_compute("k", None, |_| async move {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    // Both loaders are in flight before either stores its value.
                    gate.wait().await;
                    Ok::<_, String>(n)
                })
                .await
        }));
    }
    for h in handles {
        h.await.unwrap().unwrap();
    }

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(store.lookup("k").is_ok());
}
