//! In-memory cart.
//!
//! Units are kept in insertion order. Adding the same item twice yields two
//! separate entries; there is no quantity merging. The total is never
//! cached: [`Cart::total`] sums the current entries on every call.
//!
//! # Removal
//! [`Cart::remove`] takes out ONE unit (the first entry with the given id).
//! Removing every unit that shares an id is a separate, explicit call:
//! [`Cart::remove_all`].

use sf_catalog::{MenuItem, Money};

/// A cart line is a by-value copy of the catalog item.
pub type CartEntry = MenuItem;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a copy of `item` at the tail.
    pub fn add(&mut self, item: &MenuItem) {
        self.entries.push(item.clone());
    }

    /// Remove the first unit whose id equals `item_id`.
    pub fn remove(&mut self, item_id: &str) -> Option<CartEntry> {
        let idx = self.entries.iter().position(|e| e.id == item_id)?;
        Some(self.entries.remove(idx))
    }

    /// Remove every unit whose id equals `item_id`; returns how many went.
    pub fn remove_all(&mut self, item_id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != item_id);
        before - self.entries.len()
    }

    /// Remove the unit at `index` (as displayed in the order view).
    pub fn remove_at(&mut self, index: usize) -> Option<CartEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Saturates at the `Money` ceiling.
    pub fn total(&self) -> Money {
        self.entries.iter().map(|e| e.price).sum()
    }

    /// `None` when the exact sum does not fit.
    pub fn checked_total(&self) -> Option<Money> {
        Money::checked_sum(self.entries.iter().map(|e| e.price))
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// "1 item" / "3 items".
    pub fn count_label(&self) -> String {
        match self.entries.len() {
            1 => "1 item".to_string(),
            n => format!("{n} items"),
        }
    }
}
