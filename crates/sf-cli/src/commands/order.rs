use anyhow::{bail, Context, Result};
use sf_history::HistoryStore;
use sf_session::{HistoryView, NavRequest, OrderView, Session};
use tracing::info;

/// `Category/ID`; the id is after the last `/`.
pub fn parse_item_ref(raw: &str) -> Result<(&str, &str)> {
    let (category, id) = raw
        .rsplit_once('/')
        .with_context(|| format!("invalid --item '{raw}'. expected CATEGORY/ID"))?;
    if category.is_empty() || id.is_empty() {
        bail!("invalid --item '{raw}'. expected CATEGORY/ID");
    }
    Ok((category, id))
}

/// Add every `--item` to the cart, show the order, then submit it.
pub async fn submit(session: &mut Session, items: &[String]) -> Result<()> {
    for raw in items {
        let (category, id) = parse_item_ref(raw)?;
        match session.open_item_detail(category, id)? {
            NavRequest::OpenItemDetail(item) => {
                session.add_to_order(&item);
            }
            other => bail!("unexpected navigation: {other:?}"),
        }
    }

    render_order(&session.order_view());

    let receipt = session.submit_order().await?;
    println!("{}: {}", receipt.acknowledgement.title, receipt.acknowledgement.message);
    println!("date={}", receipt.entry.date);
    println!("time={}", receipt.entry.time);
    println!("total={}", receipt.entry.total());
    println!("entries_in_log={}", receipt.entries_in_log);
    Ok(())
}

fn render_order(view: &OrderView) {
    println!("Your Order");
    if let Some(msg) = view.empty_message {
        println!("{msg}");
        return;
    }
    for line in &view.lines {
        println!("  {:>2}. {:<28} {:>10}", line.index + 1, line.title, line.price);
    }
    println!("Total: {}", view.total);
}

pub async fn print_history(session: &Session) {
    render_history(&session.history_view().await);
}

fn render_history(view: &HistoryView) {
    println!("Order History");
    if let Some(msg) = view.empty_message {
        println!("{msg}");
        return;
    }
    for card in &view.cards {
        println!();
        println!("Date: {}", card.date);
        println!("Time: {}", card.time);
        for line in &card.lines {
            println!("  {:<28} {:>10}", line.title, line.price);
        }
        println!("Total: {}", card.total);
    }
}

/// Guardrail: wiping history requires `--yes`.
pub async fn clear_history(history: &HistoryStore, yes: bool) -> Result<()> {
    if !yes {
        bail!(
            "REFUSING CLEAR: this deletes every stored order under '{}'. Re-run with: `sf clear-history --yes`",
            history.key()
        );
    }
    history.clear().await?;
    info!(key = history.key(), "history cleared from cli");
    println!("history_cleared=true");
    Ok(())
}
