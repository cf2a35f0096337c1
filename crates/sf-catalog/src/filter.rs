//! Menu filter: search text plus category selection.
//!
//! Pure and deterministic; cheap enough to run on every keystroke for a
//! catalog of this size (a single linear scan).

use crate::catalog::Catalog;
use crate::types::{MenuCategory, MenuItem};

/// Category selection that means "no category restriction".
pub const ALL_ITEMS: &str = "All Items";

/// `true` if `title` contains `needle_lower` case-insensitively.
/// `needle_lower` must already be lowercased.
fn title_matches(title: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || title.to_lowercase().contains(needle_lower)
}

/// Does a single item pass the search text?
pub fn item_matches(item: &MenuItem, search_text: &str) -> bool {
    title_matches(&item.title, &search_text.to_lowercase())
}

/// Filter the catalog.
///
/// 1. Within each category keep the items whose title contains
///    `search_text` case-insensitively (empty text keeps everything).
/// 2. Drop categories with no remaining items.
/// 3. If `selected_category` is `Some` and not [`ALL_ITEMS`], keep only the
///    category with exactly that name.
///
/// An unknown category, or a category with no search match, yields an empty
/// vector.
pub fn filter(
    catalog: &Catalog,
    search_text: &str,
    selected_category: Option<&str>,
) -> Vec<MenuCategory> {
    let needle = search_text.to_lowercase();
    let restrict_to = selected_category.filter(|c| *c != ALL_ITEMS);

    catalog
        .categories()
        .iter()
        .filter_map(|cat| {
            let items: Vec<MenuItem> = cat
                .items
                .iter()
                .filter(|item| title_matches(&item.title, &needle))
                .cloned()
                .collect();
            (!items.is_empty()).then(|| MenuCategory {
                category: cat.category.clone(),
                items,
            })
        })
        .filter(|cat| restrict_to.map_or(true, |name| cat.category == name))
        .collect()
}
