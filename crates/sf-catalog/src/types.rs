use std::fmt;

use serde::{Deserialize, Serialize};

use crate::money::{Money, MAX_PRICE};

/// One purchasable item. Copied by value into carts and history entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    /// Image URI; loading it is the rendering layer's business.
    #[serde(default)]
    pub image: String,
}

impl MenuItem {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            price,
            image: image.into(),
        }
    }

    /// Record-level invariants: non-empty id, price within `0..=MAX_PRICE`.
    pub fn validate(&self) -> Result<(), ItemError> {
        if self.id.trim().is_empty() {
            return Err(ItemError::EmptyId {
                title: self.title.clone(),
            });
        }
        if self.price.is_negative() {
            return Err(ItemError::NegativePrice {
                id: self.id.clone(),
                price: self.price,
            });
        }
        if self.price > MAX_PRICE {
            return Err(ItemError::PriceTooLarge {
                id: self.id.clone(),
                price: self.price,
            });
        }
        Ok(())
    }
}

/// Invariant violations on a single [`MenuItem`] record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    EmptyId { title: String },
    NegativePrice { id: String, price: Money },
    PriceTooLarge { id: String, price: Money },
}

impl fmt::Display for ItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemError::EmptyId { title } => {
                write!(f, "item invariant: id must not be empty (title '{title}')")
            }
            ItemError::NegativePrice { id, price } => {
                write!(f, "item invariant: price must be >= 0 for '{id}', got {price}")
            }
            ItemError::PriceTooLarge { id, price } => {
                write!(f, "item invariant: price must be <= {MAX_PRICE} for '{id}', got {price}")
            }
        }
    }
}

impl std::error::Error for ItemError {}

/// A named group of items, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub category: String,
    pub items: Vec<MenuItem>,
}

impl MenuCategory {
    pub fn new(category: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self {
            category: category.into(),
            items,
        }
    }
}
