//! Scenario: the filter keeps exactly the items whose title contains the
//! search text (case-insensitive), and category restriction never invents
//! results.
//!
//! Property tests generate small catalogs with unique category names and
//! unique ids per category.

use proptest::prelude::*;
use sf_catalog::{filter, Catalog, MenuCategory, MenuItem, Money, ALL_ITEMS};

fn arb_catalog() -> impl Strategy<Value = Catalog> {
    prop::collection::vec(
        (
            "[A-Z][a-z]{2,8}",
            prop::collection::vec(("[a-zA-Z ]{0,12}", 0i64..5_000), 0..6),
        ),
        0..5,
    )
    .prop_map(|raw| {
        let mut categories: Vec<MenuCategory> = Vec::new();
        for (ci, (name, items)) in raw.into_iter().enumerate() {
            let items = items
                .into_iter()
                .enumerate()
                .map(|(ii, (title, cents))| {
                    MenuItem::new(ii.to_string(), title, "", Money::from_cents(cents), "")
                })
                .collect();
            // Suffix with the index so names stay unique.
            categories.push(MenuCategory::new(format!("{name}{ci}"), items));
        }
        Catalog::from_categories(categories).expect("generated catalog is valid")
    })
}

fn matches(title: &str, search: &str) -> bool {
    title.to_lowercase().contains(&search.to_lowercase())
}

proptest! {
    #[test]
    fn every_result_matches_and_no_match_is_dropped(
        catalog in arb_catalog(),
        search in "[a-zA-Z]{0,3}",
    ) {
        let out = filter(&catalog, &search, None);

        for cat in &out {
            prop_assert!(!cat.items.is_empty(), "empty categories must be dropped");
            for item in &cat.items {
                prop_assert!(matches(&item.title, &search));
            }
        }

        let expected: usize = catalog
            .categories()
            .iter()
            .flat_map(|c| c.items.iter())
            .filter(|i| matches(&i.title, &search))
            .count();
        let got: usize = out.iter().map(|c| c.items.len()).sum();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn all_items_sentinel_is_the_same_as_no_selection(
        catalog in arb_catalog(),
        search in "[a-z]{0,2}",
    ) {
        prop_assert_eq!(
            filter(&catalog, &search, Some(ALL_ITEMS)),
            filter(&catalog, &search, None)
        );
    }

    #[test]
    fn unknown_category_yields_nothing(catalog in arb_catalog(), search in "[a-z]{0,2}") {
        // Generated names never contain '#'.
        prop_assert!(filter(&catalog, &search, Some("No#Such#Category")).is_empty());
    }

    #[test]
    fn selected_category_is_a_subset_of_unrestricted(
        catalog in arb_catalog(),
        search in "[a-z]{0,2}",
    ) {
        let all = filter(&catalog, &search, None);
        for name in catalog.category_names() {
            let only = filter(&catalog, &search, Some(name));
            prop_assert!(only.len() <= 1);
            if let Some(cat) = only.first() {
                prop_assert_eq!(&cat.category, name);
                prop_assert!(all.contains(cat));
            }
        }
    }
}

#[test]
fn chicken_and_sides_scenario() {
    let catalog = Catalog::from_json_str(
        r#"[
            {"category": "Chicken", "items": [
                {"id": "A", "title": "Original Recipe", "description": "", "price": 5.99, "image": ""},
                {"id": "B", "title": "Hot Wings", "description": "", "price": 7.49, "image": ""}
            ]},
            {"category": "Sides", "items": [
                {"id": "C", "title": "Coleslaw", "description": "", "price": 2.99, "image": ""}
            ]}
        ]"#,
    )
    .unwrap();

    // "recipe" only matches A.
    let out = filter(&catalog, "RECIPE", Some(ALL_ITEMS));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].category, "Chicken");
    assert_eq!(out[0].items.len(), 1);
    assert_eq!(out[0].items[0].id, "A");
    assert_eq!(out[0].items[0].price, Money::from_cents(599));

    // Category selected but nothing in it matches.
    assert!(filter(&catalog, "recipe", Some("Sides")).is_empty());
}
