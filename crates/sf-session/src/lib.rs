//! sf-session
//!
//! The storefront session: one cart, the menu filter state, and the actions
//! behind each screen (menu, item detail, order, history). Actions return
//! [`NavRequest`]s and view models; the host UI renders them.

mod clock;
mod locale;
mod nav;
mod session;
pub mod views;

pub use clock::{Clock, FixedClock, SystemClock};
pub use locale::{StampFormat, StampFormatError};
pub use nav::NavRequest;
pub use session::{
    Acknowledgement, Session, SessionError, SessionSettings, SubmitError, SubmitReceipt,
    ORDER_SUBMITTED,
};
pub use views::{HistoryView, ItemDetailView, MenuView, OrderView};
