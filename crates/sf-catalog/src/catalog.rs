//! Read-only catalog loaded once at startup.
//!
//! [`Catalog`] can only be built through [`Catalog::from_categories`] (or the
//! JSON/file helpers that end up there), so every instance in the process has
//! passed validation:
//!
//! - category names are non-empty and unique
//! - item ids are non-empty and unique within their category
//! - prices are non-negative
//!
//! Malformed records are rejected here instead of reaching the views.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::filter::ALL_ITEMS;
use crate::types::{ItemError, MenuCategory, MenuItem};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The document is not a JSON array of categories (includes bad prices).
    Malformed(String),
    EmptyCategoryName { index: usize },
    DuplicateCategory { category: String },
    DuplicateItemId { category: String, id: String },
    InvalidItem { category: String, source: ItemError },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Malformed(msg) => write!(f, "catalog is malformed: {msg}"),
            CatalogError::EmptyCategoryName { index } => {
                write!(f, "catalog category #{index} has an empty name")
            }
            CatalogError::DuplicateCategory { category } => {
                write!(f, "catalog category '{category}' appears more than once")
            }
            CatalogError::DuplicateItemId { category, id } => {
                write!(f, "item id '{id}' appears more than once in '{category}'")
            }
            CatalogError::InvalidItem { category, source } => {
                write!(f, "invalid item in '{category}': {source}")
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::InvalidItem { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<MenuCategory>,
}

impl Catalog {
    pub fn from_categories(categories: Vec<MenuCategory>) -> Result<Self, CatalogError> {
        let mut seen_categories = BTreeSet::new();
        for (index, cat) in categories.iter().enumerate() {
            if cat.category.trim().is_empty() {
                return Err(CatalogError::EmptyCategoryName { index });
            }
            if !seen_categories.insert(cat.category.as_str()) {
                return Err(CatalogError::DuplicateCategory {
                    category: cat.category.clone(),
                });
            }

            let mut seen_ids = BTreeSet::new();
            for item in &cat.items {
                item.validate().map_err(|source| CatalogError::InvalidItem {
                    category: cat.category.clone(),
                    source,
                })?;
                if !seen_ids.insert(item.id.as_str()) {
                    return Err(CatalogError::DuplicateItemId {
                        category: cat.category.clone(),
                        id: item.id.clone(),
                    });
                }
            }
        }

        Ok(Self { categories })
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let categories: Vec<MenuCategory> =
            serde_json::from_str(json).map_err(|e| CatalogError::Malformed(e.to_string()))?;
        Self::from_categories(categories)
    }

    /// Load and validate a catalog document from disk.
    pub fn load_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read catalog {:?}", path))?;
        let catalog = Self::from_json_str(&raw)
            .with_context(|| format!("load catalog {:?}", path))?;
        info!(
            categories = catalog.categories.len(),
            items = catalog.item_count(),
            "catalog loaded from {:?}",
            path
        );
        Ok(catalog)
    }

    pub fn categories(&self) -> &[MenuCategory] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&MenuCategory> {
        self.categories.iter().find(|c| c.category == name)
    }

    pub fn find_item(&self, category: &str, id: &str) -> Option<&MenuItem> {
        self.category(category)?.items.iter().find(|i| i.id == id)
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.category.as_str())
    }

    /// Options for the category picker: the "All Items" sentinel followed by
    /// every category in catalog order.
    pub fn category_options(&self) -> Vec<String> {
        std::iter::once(ALL_ITEMS)
            .chain(self.category_names())
            .map(str::to_string)
            .collect()
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}
