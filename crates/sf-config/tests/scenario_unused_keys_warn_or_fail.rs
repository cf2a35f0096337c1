//! Unused config keys.
//!
//! GREEN when:
//! 1) unused keys are reported in Warn mode without an error
//! 2) unused keys fail in Fail mode
//! 3) keys under consumed prefixes are never flagged
//! 4) the unused list is sorted

use sf_config::{load_layered_yaml_from_strings, report_unused_keys, UnusedKeyPolicy};

const YAML: &str = r#"
storefront:
  title: "KFC Menu"
  theme: "red"
store:
  dir: ".storefront"
legacy:
  b: 2
  a: 1
"#;

#[test]
fn warn_mode_reports_unused_keys_without_error() {
    let loaded = load_layered_yaml_from_strings(&[YAML]).unwrap();
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn).unwrap();

    assert!(!report.is_clean());
    assert_eq!(
        report.unused_leaf_pointers,
        vec!["/legacy/a", "/legacy/b", "/storefront/theme"]
    );
}

#[test]
fn fail_mode_errors_on_unused_keys() {
    let loaded = load_layered_yaml_from_strings(&[YAML]).unwrap();
    let err = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("CONFIG_UNUSED_KEYS"));
    assert!(msg.contains("/legacy/a"));
}

#[test]
fn fully_consumed_config_is_clean() {
    let yaml = r#"
storefront:
  title: "Menu"
catalog:
  path: "menu.json"
store:
  dir: "data"
  history_key: "orderHistory"
locale:
  date_format: "%-m/%-d/%Y"
  time_format: "%H:%M"
currency:
  symbol: "€"
"#;
    let loaded = load_layered_yaml_from_strings(&[yaml]).unwrap();
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail).unwrap();
    assert!(report.is_clean());
    assert!(report.consumed_prefixes.contains(&"/store/dir".to_string()));
}
