//! Shared fixtures for cross-crate scenario tests.
//!
//! - [`SAMPLE_CATALOG_JSON`]: "Chicken" (A 5.99, B 7.49) and "Sides" (C 2.99)
//! - [`FIXED_AT`]-based clock so history stamps are predictable
//! - [`Harness`]: a session wired to a fault-injecting in-memory store

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use sf_catalog::{Catalog, MenuItem};
use sf_history::HistoryStore;
use sf_session::{FixedClock, NavRequest, Session, SessionSettings};
use sf_store::{FaultInjectingStore, KeyValueStore, MemoryStore};

pub const SAMPLE_CATALOG_JSON: &str = r#"[
  {
    "category": "Chicken",
    "items": [
      {"id": "A", "title": "Original Recipe", "description": "Two pieces", "price": 5.99, "image": "https://img.example/a.png"},
      {"id": "B", "title": "Spicy Wings", "description": "Six wings", "price": "7.49", "image": "https://img.example/b.png"}
    ]
  },
  {
    "category": "Sides",
    "items": [
      {"id": "C", "title": "Fries", "description": "Large", "price": 2.99, "image": "https://img.example/c.png"}
    ]
  }
]"#;

/// 2026-10-16 12:30:00, stamped as `10/16/2026` / `12:30:00 PM`.
pub const FIXED_AT: (i32, u32, u32, u32, u32, u32) = (2026, 10, 16, 12, 30, 0);
pub const FIXED_DATE: &str = "10/16/2026";
pub const FIXED_TIME: &str = "12:30:00 PM";

pub fn sample_catalog() -> Arc<Catalog> {
    match Catalog::from_json_str(SAMPLE_CATALOG_JSON) {
        Ok(c) => Arc::new(c),
        Err(e) => panic!("sample catalog must load: {e}"),
    }
}

/// Item from the sample catalog; panics on an unknown id.
pub fn sample_item(category: &str, id: &str) -> MenuItem {
    sample_catalog()
        .find_item(category, id)
        .cloned()
        .unwrap_or_else(|| panic!("no sample item {category}/{id}"))
}

pub fn fixed_instant() -> NaiveDateTime {
    let (y, mo, d, h, mi, s) = FIXED_AT;
    NaiveDate::from_ymd_opt(y, mo, d)
        .and_then(|date| date.and_hms_opt(h, mi, s))
        .unwrap_or_else(|| panic!("FIXED_AT is a valid timestamp"))
}

pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(fixed_instant()))
}

pub type FaultyMemory = FaultInjectingStore<MemoryStore>;

/// A session plus handles on everything behind it.
pub struct Harness {
    pub store: Arc<FaultyMemory>,
    pub history: Arc<HistoryStore>,
    pub session: Session,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// Start from an already-populated store (e.g. a corrupt blob).
    pub fn with_store(inner: MemoryStore) -> Self {
        let store = Arc::new(FaultInjectingStore::new(inner));
        let dyn_store: Arc<dyn KeyValueStore> = store.clone();
        let history = Arc::new(HistoryStore::new(dyn_store));
        let session = Session::new(sample_catalog(), history.clone(), SessionSettings::default())
            .with_clock(fixed_clock());
        Self {
            store,
            history,
            session,
        }
    }

    /// Open the detail screen for `category/id` and press "Add to Order".
    pub fn add(&mut self, category: &str, id: &str) {
        match self.session.open_item_detail(category, id) {
            Ok(NavRequest::OpenItemDetail(item)) => {
                self.session.add_to_order(&item);
            }
            other => panic!("cannot open {category}/{id}: {other:?}"),
        }
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
