//! Render-ready view models. Prices are already formatted with the
//! configured currency symbol; nothing here touches the store.

use sf_catalog::{Catalog, MenuCategory, MenuItem, Money};
use sf_order::{Cart, HistoryEntry, HistoryLog};

pub const ADD_TO_ORDER_LABEL: &str = "Add to Order";
pub const ORDER_HISTORY_LABEL: &str = "My Orders";
pub const EMPTY_ORDER_MESSAGE: &str = "Your order is empty";
pub const EMPTY_HISTORY_MESSAGE: &str = "No order history available";

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSection {
    pub category: String,
    pub rows: Vec<MenuRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    pub title: String,
    pub search_text: String,
    pub category_options: Vec<CategoryOption>,
    pub sections: Vec<MenuSection>,
    /// "View Order (N item|items)"
    pub view_order_label: String,
    /// Header action that opens the order history.
    pub order_history_label: &'static str,
}

impl MenuView {
    pub(crate) fn build(
        title: &str,
        catalog: &Catalog,
        search_text: &str,
        selected: &str,
        filtered: &[MenuCategory],
        cart: &Cart,
        symbol: &str,
    ) -> Self {
        let category_options = catalog
            .category_options()
            .into_iter()
            .map(|name| CategoryOption {
                selected: name == selected,
                name,
            })
            .collect();

        let sections = filtered
            .iter()
            .map(|c| MenuSection {
                category: c.category.clone(),
                rows: c
                    .items
                    .iter()
                    .map(|i| MenuRow {
                        id: i.id.clone(),
                        title: i.title.clone(),
                        description: i.description.clone(),
                        price: i.price.format_with_symbol(symbol),
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: title.to_string(),
            search_text: search_text.to_string(),
            category_options,
            sections,
            view_order_label: format!("View Order ({})", cart.count_label()),
            order_history_label: ORDER_HISTORY_LABEL,
        }
    }

    pub fn row_count(&self) -> usize {
        self.sections.iter().map(|s| s.rows.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Item detail
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDetailView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub action_label: &'static str,
}

impl ItemDetailView {
    pub(crate) fn build(item: &MenuItem, symbol: &str) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            description: item.description.clone(),
            price: item.price.format_with_symbol(symbol),
            image: item.image.clone(),
            action_label: ADD_TO_ORDER_LABEL,
        }
    }
}

// ---------------------------------------------------------------------------
// Order / history
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    /// Position in the cart; pass to `Session::remove_line`.
    pub index: usize,
    pub id: String,
    pub title: String,
    pub price: String,
}

fn lines(items: &[MenuItem], symbol: &str) -> Vec<OrderLine> {
    items
        .iter()
        .enumerate()
        .map(|(index, i)| OrderLine {
            index,
            id: i.id.clone(),
            title: i.title.clone(),
            price: i.price.format_with_symbol(symbol),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderView {
    pub lines: Vec<OrderLine>,
    pub total: String,
    /// Set when the cart is empty; the UI hides the total and submit button.
    pub empty_message: Option<&'static str>,
}

impl OrderView {
    pub(crate) fn build(cart: &Cart, symbol: &str) -> Self {
        Self {
            lines: lines(cart.entries(), symbol),
            total: cart.total().format_with_symbol(symbol),
            empty_message: cart.is_empty().then_some(EMPTY_ORDER_MESSAGE),
        }
    }

    pub fn can_submit(&self) -> bool {
        self.empty_message.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryCard {
    pub date: String,
    pub time: String,
    pub lines: Vec<OrderLine>,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryView {
    /// Oldest first, as submitted.
    pub cards: Vec<HistoryCard>,
    pub empty_message: Option<&'static str>,
}

impl HistoryView {
    pub(crate) fn build(log: &HistoryLog, symbol: &str) -> Self {
        Self {
            cards: log.entries().iter().map(|e| card(e, symbol)).collect(),
            empty_message: log.is_empty().then_some(EMPTY_HISTORY_MESSAGE),
        }
    }

    /// Sum over every card.
    pub fn grand_total(log: &HistoryLog) -> Money {
        log.entries().iter().map(HistoryEntry::total).sum()
    }
}

fn card(entry: &HistoryEntry, symbol: &str) -> HistoryCard {
    HistoryCard {
        date: entry.date.clone(),
        time: entry.time.clone(),
        lines: lines(&entry.order, symbol),
        total: entry.total().format_with_symbol(symbol),
    }
}
