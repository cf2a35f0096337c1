//! sf-order
//!
//! Order-side state with no IO and no clock:
//! - `Cart`: ordered units selected in the current session
//! - `HistoryEntry`: immutable snapshot of one submitted cart
//! - `HistoryLog`: append-only sequence of entries, in submission order

mod cart;
mod history;

pub use cart::{Cart, CartEntry};
pub use history::{HistoryEntry, HistoryLog};
