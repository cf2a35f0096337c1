use serde::{Deserialize, Serialize};
use sf_catalog::{ItemError, Money};

use crate::cart::{Cart, CartEntry};

/// One submitted order. The `order` vector is a by-value snapshot taken at
/// submission; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Locale-formatted calendar date.
    pub date: String,
    /// Locale-formatted clock time.
    pub time: String,
    pub order: Vec<CartEntry>,
}

impl HistoryEntry {
    /// Snapshot the cart's current contents.
    pub fn snapshot(cart: &Cart, date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            order: cart.entries().to_vec(),
        }
    }

    /// Saturating, like `Cart::total`.
    pub fn total(&self) -> Money {
        self.order.iter().map(|e| e.price).sum()
    }

    /// Every snapshotted item must still satisfy the item invariants.
    pub fn validate(&self) -> Result<(), ItemError> {
        self.order.iter().try_for_each(|e| e.validate())
    }
}

/// Append-only order history, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append at the tail. There is no removal.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate every entry; returns the index of the first bad one.
    pub fn validate(&self) -> Result<(), (usize, ItemError)> {
        for (i, entry) in self.entries.iter().enumerate() {
            entry.validate().map_err(|e| (i, e))?;
        }
        Ok(())
    }
}

impl IntoIterator for HistoryLog {
    type Item = HistoryEntry;
    type IntoIter = std::vec::IntoIter<HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
