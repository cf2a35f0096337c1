use sf_catalog::MenuItem;

/// Screen transitions requested by session actions. The host UI performs
/// them; the cart never travels with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavRequest {
    /// Menu row tapped.
    OpenItemDetail(MenuItem),
    /// "View Order".
    OpenOrder,
    /// "Order History".
    OpenHistory,
    /// After a successful submission.
    ReturnToMenu,
    /// After "Add to Order" on the detail screen.
    Back,
}
