use std::fmt;
use std::sync::Arc;

use sf_catalog::{filter, Catalog, MenuCategory, MenuItem, ALL_ITEMS};
use sf_config::StorefrontConfig;
use sf_history::{HistoryError, HistoryStore};
use sf_order::{Cart, CartEntry, HistoryEntry};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::locale::{StampFormat, StampFormatError};
use crate::nav::NavRequest;
use crate::views::{HistoryView, ItemDetailView, MenuView, OrderView};

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub title: String,
    pub currency_symbol: String,
    pub stamp: StampFormat,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            title: "Menu".to_string(),
            currency_symbol: "$".to_string(),
            stamp: StampFormat::default(),
        }
    }
}

impl SessionSettings {
    pub fn from_config(cfg: &StorefrontConfig) -> Result<Self, StampFormatError> {
        Ok(Self {
            title: cfg.title.clone(),
            currency_symbol: cfg.currency_symbol.clone(),
            stamp: StampFormat::new(cfg.date_format.as_str(), cfg.time_format.as_str())?,
        })
    }
}

// ---------------------------------------------------------------------------
// Errors / receipts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    UnknownItem { category: String, id: String },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::UnknownItem { category, id } => {
                write!(f, "no item '{id}' in category '{category}'")
            }
        }
    }
}

impl std::error::Error for SessionError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Nothing to submit; neither the store nor the cart was touched.
    EmptyCart,
    /// The order was not saved; the cart is unchanged.
    History(HistoryError),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::EmptyCart => write!(f, "cannot submit an empty order"),
            SubmitError::History(e) => write!(f, "order was not saved: {e}"),
        }
    }
}

impl std::error::Error for SubmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SubmitError::History(e) => Some(e),
            SubmitError::EmptyCart => None,
        }
    }
}

/// User-facing confirmation shown once the order is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acknowledgement {
    pub title: &'static str,
    pub message: &'static str,
}

pub const ORDER_SUBMITTED: Acknowledgement = Acknowledgement {
    title: "Order Submitted",
    message: "Thank you for your order!",
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub entry: HistoryEntry,
    /// Log length after the append.
    pub entries_in_log: usize,
    pub acknowledgement: Acknowledgement,
    pub nav: NavRequest,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One storefront session. Owns the cart; every screen reads it from here.
pub struct Session {
    id: Uuid,
    catalog: Arc<Catalog>,
    history: Arc<HistoryStore>,
    clock: Arc<dyn Clock>,
    settings: SessionSettings,
    cart: Cart,
    search_text: String,
    selected_category: String,
}

impl Session {
    pub fn new(catalog: Arc<Catalog>, history: Arc<HistoryStore>, settings: SessionSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            catalog,
            history,
            clock: Arc::new(SystemClock),
            settings,
            cart: Cart::new(),
            search_text: String::new(),
            selected_category: ALL_ITEMS.to_string(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    // --- menu -------------------------------------------------------------

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    /// Any name is accepted; one the catalog lacks filters to nothing.
    pub fn select_category(&mut self, name: impl Into<String>) {
        self.selected_category = name.into();
    }

    pub fn filtered(&self) -> Vec<MenuCategory> {
        filter(&self.catalog, &self.search_text, Some(&self.selected_category))
    }

    pub fn menu_view(&self) -> MenuView {
        MenuView::build(
            &self.settings.title,
            &self.catalog,
            &self.search_text,
            &self.selected_category,
            &self.filtered(),
            &self.cart,
            &self.settings.currency_symbol,
        )
    }

    pub fn open_item_detail(&self, category: &str, id: &str) -> Result<NavRequest, SessionError> {
        self.catalog
            .find_item(category, id)
            .cloned()
            .map(NavRequest::OpenItemDetail)
            .ok_or_else(|| SessionError::UnknownItem {
                category: category.to_string(),
                id: id.to_string(),
            })
    }

    pub fn item_detail_view(&self, item: &MenuItem) -> ItemDetailView {
        ItemDetailView::build(item, &self.settings.currency_symbol)
    }

    /// "Add to Order": one more unit, then back to the previous screen.
    pub fn add_to_order(&mut self, item: &MenuItem) -> NavRequest {
        self.cart.add(item);
        debug!(session = %self.id, item = %item.id, units = self.cart.len(), "added to order");
        NavRequest::Back
    }

    pub fn open_order(&self) -> NavRequest {
        NavRequest::OpenOrder
    }

    pub fn open_history(&self) -> NavRequest {
        NavRequest::OpenHistory
    }

    // --- order ------------------------------------------------------------

    /// Removes a single unit with this id.
    pub fn remove_from_order(&mut self, item_id: &str) -> Option<CartEntry> {
        self.cart.remove(item_id)
    }

    pub fn remove_line(&mut self, index: usize) -> Option<CartEntry> {
        self.cart.remove_at(index)
    }

    pub fn order_view(&self) -> OrderView {
        OrderView::build(&self.cart, &self.settings.currency_symbol)
    }

    /// Stamp the cart with the clock, append it to the history and, once the
    /// write is confirmed, clear the cart.
    pub async fn submit_order(&mut self) -> Result<SubmitReceipt, SubmitError> {
        if self.cart.is_empty() {
            return Err(SubmitError::EmptyCart);
        }

        let (date, time) = self.settings.stamp.stamp(&self.clock.now());
        let entry = HistoryEntry::snapshot(&self.cart, date, time);

        let entries_in_log = match self.history.append(entry.clone()).await {
            Ok(n) => n,
            Err(e) => {
                error!(session = %self.id, units = self.cart.len(), "order not saved: {e}");
                return Err(SubmitError::History(e));
            }
        };

        self.cart.clear();
        info!(
            session = %self.id,
            units = entry.order.len(),
            total = %entry.total(),
            entries_in_log,
            "order submitted"
        );

        Ok(SubmitReceipt {
            entry,
            entries_in_log,
            acknowledgement: ORDER_SUBMITTED,
            nav: NavRequest::ReturnToMenu,
        })
    }

    /// Read and corrupt errors show as an empty history.
    pub async fn history_view(&self) -> HistoryView {
        let log = self.history.load_or_empty().await;
        HistoryView::build(&log, &self.settings.currency_symbol)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("history", &self.history)
            .field("clock", &self.clock)
            .field("cart_units", &self.cart.len())
            .field("search_text", &self.search_text)
            .field("selected_category", &self.selected_category)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;
    use sf_catalog::Money;
    use sf_store::MemoryStore;

    fn catalog() -> Arc<Catalog> {
        Arc::new(
            Catalog::from_categories(vec![
                MenuCategory::new(
                    "Chicken",
                    vec![
                        MenuItem::new("A", "Original Recipe", "", Money::from_cents(599), ""),
                        MenuItem::new("B", "Spicy Wings", "", Money::from_cents(749), ""),
                    ],
                ),
                MenuCategory::new(
                    "Sides",
                    vec![MenuItem::new("C", "Fries", "", Money::from_cents(299), "")],
                ),
            ])
            .unwrap(),
        )
    }

    fn session() -> Session {
        let history = Arc::new(HistoryStore::new(Arc::new(MemoryStore::new())));
        let at = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        Session::new(catalog(), history, SessionSettings::default())
            .with_clock(Arc::new(FixedClock(at)))
    }

    #[test]
    fn menu_view_reflects_search_and_selection() {
        let mut s = session();
        s.set_search_text("recipe");
        let v = s.menu_view();
        assert_eq!(v.title, "Menu");
        assert_eq!(v.row_count(), 1);
        assert_eq!(v.sections[0].rows[0].price, "$5.99");
        assert!(v.category_options[0].selected);
        assert_eq!(v.view_order_label, "View Order (0 items)");
        assert_eq!(v.order_history_label, "My Orders");

        s.set_search_text("");
        s.select_category("Sides");
        let v = s.menu_view();
        assert_eq!(v.sections.len(), 1);
        assert_eq!(v.sections[0].category, "Sides");
        assert!(v.category_options.iter().any(|o| o.name == "Sides" && o.selected));
    }

    #[test]
    fn detail_then_add_goes_back_and_updates_label() {
        let mut s = session();
        let item = match s.open_item_detail("Chicken", "B").unwrap() {
            NavRequest::OpenItemDetail(item) => item,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(s.item_detail_view(&item).action_label, "Add to Order");
        assert_eq!(s.add_to_order(&item), NavRequest::Back);
        assert_eq!(s.menu_view().view_order_label, "View Order (1 item)");
    }

    #[test]
    fn unknown_item_is_an_error() {
        let s = session();
        assert_eq!(
            s.open_item_detail("Sides", "A").unwrap_err(),
            SessionError::UnknownItem {
                category: "Sides".into(),
                id: "A".into()
            }
        );
    }

    #[tokio::test]
    async fn submit_empty_cart_rejected() {
        let mut s = session();
        assert_eq!(s.submit_order().await.unwrap_err(), SubmitError::EmptyCart);
        assert!(s.history_view().await.cards.is_empty());
    }

    #[tokio::test]
    async fn submit_stamps_clears_and_returns_to_menu() {
        let mut s = session();
        let item = s.catalog().find_item("Chicken", "A").cloned().unwrap();
        s.add_to_order(&item);

        let receipt = s.submit_order().await.unwrap();
        assert_eq!(receipt.entry.date, "10/16/2026");
        assert_eq!(receipt.entry.time, "12:30:00 PM");
        assert_eq!(receipt.entries_in_log, 1);
        assert_eq!(receipt.acknowledgement, ORDER_SUBMITTED);
        assert_eq!(receipt.nav, NavRequest::ReturnToMenu);
        assert!(s.cart().is_empty());

        let history = s.history_view().await;
        assert_eq!(history.cards.len(), 1);
        assert_eq!(history.cards[0].total, "$5.99");
    }
}
