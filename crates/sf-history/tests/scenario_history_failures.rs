//! Scenario: persistence failures follow the history failure policy.
//!
//! GREEN when:
//! - a corrupt blob makes `load` fail with Corrupt and `load_or_empty`
//!   return an empty log
//! - a read failure makes `load` fail with Read and aborts `append`
//!   without writing
//! - a write failure surfaces as Write and leaves the stored log unchanged
//! - appending over a corrupt blob replaces it with the new entry only

use std::sync::Arc;

use sf_catalog::{MenuItem, Money};
use sf_history::{HistoryError, HistoryStore, DEFAULT_HISTORY_KEY};
use sf_order::{Cart, HistoryEntry};
use sf_store::{FaultInjectingStore, KeyValueStore, MemoryStore, StoreError};

fn entry(id: &str) -> HistoryEntry {
    let mut cart = Cart::new();
    cart.add(&MenuItem::new(id, "Item", "", Money::from_cents(599), ""));
    HistoryEntry::snapshot(&cart, "d", "t")
}

#[tokio::test]
async fn corrupt_blob_is_reported_and_degrades_to_empty() {
    let store = Arc::new(MemoryStore::with_value(DEFAULT_HISTORY_KEY, "{not json"));
    let history = HistoryStore::new(store);

    assert!(matches!(history.load().await, Err(HistoryError::Corrupt { .. })));
    assert!(history.load_or_empty().await.is_empty());
}

#[tokio::test]
async fn wrong_shape_is_corrupt() {
    let store = Arc::new(MemoryStore::with_value(DEFAULT_HISTORY_KEY, r#"{"date":"d"}"#));
    let history = HistoryStore::new(store);
    assert!(matches!(history.load().await, Err(HistoryError::Corrupt { .. })));
}

#[tokio::test]
async fn read_failure_degrades_view_and_blocks_append() {
    let store = Arc::new(FaultInjectingStore::new(MemoryStore::new()));
    let history = HistoryStore::new(store.clone());
    history.append(entry("A")).await.unwrap();

    store.fail_reads(true);
    assert!(matches!(
        history.load().await,
        Err(HistoryError::Read(StoreError::Unavailable(_)))
    ));
    assert!(history.load_or_empty().await.is_empty());

    assert!(matches!(history.append(entry("B")).await, Err(HistoryError::Read(_))));
    assert_eq!(store.successful_writes(), 1, "append must not write blind");

    store.fail_reads(false);
    assert_eq!(history.load().await.unwrap().len(), 1);
}

#[tokio::test]
async fn write_failure_leaves_log_unchanged() {
    let store = Arc::new(FaultInjectingStore::new(MemoryStore::new()));
    let history = HistoryStore::new(store.clone());
    history.append(entry("A")).await.unwrap();
    let before = history.load().await.unwrap();

    store.fail_writes(true);
    let err = history.append(entry("B")).await.unwrap_err();
    assert!(matches!(err, HistoryError::Write(_)));
    assert!(err.to_string().contains("could not be saved"));

    assert_eq!(history.load().await.unwrap(), before);
}

#[tokio::test]
async fn append_over_corrupt_blob_starts_fresh() {
    let store = Arc::new(MemoryStore::with_value(DEFAULT_HISTORY_KEY, "[garbage"));
    let history = HistoryStore::new(store.clone());

    assert_eq!(history.append(entry("A")).await.unwrap(), 1);
    let log = history.load().await.unwrap();
    assert_eq!(log.entries(), &[entry("A")]);
    assert!(store.get(DEFAULT_HISTORY_KEY).await.unwrap().unwrap().starts_with("[{"));
}
