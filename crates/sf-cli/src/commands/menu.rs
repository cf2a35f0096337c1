use anyhow::Result;
use sf_session::{ItemDetailView, MenuView, NavRequest, Session};

pub fn print_menu(session: &mut Session, search: Option<String>, category: Option<String>) {
    if let Some(text) = search {
        session.set_search_text(text);
    }
    if let Some(name) = category {
        session.select_category(name);
    }
    render_menu(&session.menu_view());
}

fn render_menu(view: &MenuView) {
    println!("{}    [{}]", view.title, view.order_history_label);
    let options: Vec<String> = view
        .category_options
        .iter()
        .map(|o| {
            if o.selected {
                format!("[{}]", o.name)
            } else {
                o.name.clone()
            }
        })
        .collect();
    println!("{}", options.join(" | "));

    if view.sections.is_empty() {
        println!("no items match");
    }
    for section in &view.sections {
        println!();
        println!("== {} ==", section.category);
        for row in &section.rows {
            println!("  {:<8} {:<28} {:>10}", row.id, row.title, row.price);
            if !row.description.is_empty() {
                println!("           {}", row.description);
            }
        }
    }
    println!();
    println!("{}", view.view_order_label);
}

pub fn print_categories(session: &Session) {
    for name in session.catalog().category_options() {
        println!("{name}");
    }
}

pub fn print_item(session: &Session, category: &str, id: &str) -> Result<()> {
    match session.open_item_detail(category, id)? {
        NavRequest::OpenItemDetail(item) => render_item(&session.item_detail_view(&item)),
        other => anyhow::bail!("unexpected navigation: {other:?}"),
    }
    Ok(())
}

fn render_item(view: &ItemDetailView) {
    println!("id={}", view.id);
    println!("title={}", view.title);
    println!("description={}", view.description);
    println!("price={}", view.price);
    println!("image={}", view.image);
    println!("action={}", view.action_label);
}
