//! Scenario: the history log round-trips through the key-value store.
//!
//! GREEN when:
//! - load on an empty store is an empty log
//! - load after one append on an empty store is exactly [e]
//! - repeated loads with no intervening writes are equal
//! - entries stay in submission order across store handles (FileStore)

use std::sync::Arc;

use sf_catalog::{MenuItem, Money};
use sf_history::{HistoryStore, DEFAULT_HISTORY_KEY};
use sf_order::{Cart, HistoryEntry};
use sf_store::{FileStore, KeyValueStore, MemoryStore};

fn entry(id: &str, cents: i64, time: &str) -> HistoryEntry {
    let mut cart = Cart::new();
    cart.add(&MenuItem::new(id, format!("Item {id}"), "desc", Money::from_cents(cents), "img"));
    HistoryEntry::snapshot(&cart, "10/16/2026", time)
}

#[tokio::test]
async fn empty_store_loads_empty_log() {
    let history = HistoryStore::new(Arc::new(MemoryStore::new()));
    assert!(history.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn append_then_load_yields_single_entry() {
    let history = HistoryStore::new(Arc::new(MemoryStore::new()));
    let e = entry("A", 599, "12:00:00 PM");

    assert_eq!(history.append(e.clone()).await.unwrap(), 1);

    let log = history.load().await.unwrap();
    assert_eq!(log.entries(), &[e]);
}

#[tokio::test]
async fn load_is_idempotent() {
    let history = HistoryStore::new(Arc::new(MemoryStore::new()));
    history.append(entry("A", 599, "t1")).await.unwrap();
    history.append(entry("B", 749, "t2")).await.unwrap();

    let first = history.load().await.unwrap();
    let second = history.load().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[tokio::test]
async fn decimal_prices_round_trip_exactly() {
    let history = HistoryStore::new(Arc::new(MemoryStore::new()));
    let mut odd = entry("X", 0, "t");
    odd.order[0].price = Money::from_micros(1_125_000);
    history.append(odd.clone()).await.unwrap();

    let log = history.load().await.unwrap();
    assert_eq!(log.entries()[0].order[0].price, Money::from_micros(1_125_000));
    assert_eq!(log.entries(), &[odd]);
}

#[tokio::test]
async fn file_store_keeps_submission_order_across_handles() {
    let dir = tempfile::tempdir().unwrap();
    {
        let history = HistoryStore::new(Arc::new(FileStore::new(dir.path()).unwrap()));
        history.append(entry("A", 599, "t1")).await.unwrap();
        history.append(entry("B", 749, "t2")).await.unwrap();
    }

    let store = Arc::new(FileStore::new(dir.path()).unwrap());
    assert!(store.get(DEFAULT_HISTORY_KEY).await.unwrap().is_some());

    let history = HistoryStore::new(store);
    history.append(entry("C", 299, "t3")).await.unwrap();
    let times: Vec<String> = history
        .load()
        .await
        .unwrap()
        .entries()
        .iter()
        .map(|e| e.time.clone())
        .collect();
    assert_eq!(times, vec!["t1", "t2", "t3"]);
}

#[tokio::test]
async fn custom_key_and_clear() {
    let store = Arc::new(MemoryStore::new());
    let history = HistoryStore::with_key(store.clone(), "orders_v2");
    history.append(entry("A", 599, "t")).await.unwrap();

    assert!(store.get("orders_v2").await.unwrap().is_some());
    assert!(store.get(DEFAULT_HISTORY_KEY).await.unwrap().is_none());

    history.clear().await.unwrap();
    assert!(history.load().await.unwrap().is_empty());
}
