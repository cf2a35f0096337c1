//! sf-catalog
//!
//! Static menu data and the filter engine.
//! - `Money`: exact fixed-point prices (micros)
//! - `MenuItem` / `MenuCategory`: typed catalog records
//! - `Catalog`: validated, read-only collection loaded once at startup
//! - `filter`: search text + category selection, pure and deterministic

mod catalog;
mod types;

pub mod filter;
pub mod money;

pub use catalog::{Catalog, CatalogError};
pub use filter::{filter, item_matches, ALL_ITEMS};
pub use money::{Money, MoneyError, MAX_PRICE, MICROS_SCALE};
pub use types::{ItemError, MenuCategory, MenuItem};
