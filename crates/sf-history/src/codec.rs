//! History blob codec.
//!
//! The whole log is one JSON array under one key:
//!
//! ```text
//! [{"date":"10/16/2026","order":[{"description":"..","id":"A","image":"..","price":"5.99","title":".."}],"time":"12:30:00 PM"}]
//! ```
//!
//! Object keys are sorted recursively and the output is compact, so the same
//! log always encodes to the same bytes. Prices are decimal strings; JSON
//! numbers are accepted on decode.

use serde_json::Value;
use sf_order::HistoryLog;

use crate::HistoryError;

pub fn encode_log(log: &HistoryLog) -> Result<String, HistoryError> {
    let raw = serde_json::to_value(log).map_err(|e| HistoryError::Encode(e.to_string()))?;
    serde_json::to_string(&sort_keys(&raw)).map_err(|e| HistoryError::Encode(e.to_string()))
}

/// Decode and validate. Any shape or invariant problem is `Corrupt`.
pub fn decode_log(blob: &str) -> Result<HistoryLog, HistoryError> {
    let log: HistoryLog = serde_json::from_str(blob).map_err(|e| HistoryError::Corrupt {
        reason: e.to_string(),
    })?;
    log.validate().map_err(|(idx, e)| HistoryError::Corrupt {
        reason: format!("entry #{idx}: {e}"),
    })?;
    Ok(log)
}

fn sort_keys(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut keys: Vec<_> = map.keys().cloned().collect();
            keys.sort();
            let mut new = serde_json::Map::new();
            for k in keys {
                new.insert(k.clone(), sort_keys(&map[&k]));
            }
            Value::Object(new)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_keys).collect()),
        _ => v.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_catalog::{MenuItem, Money};
    use sf_order::{Cart, HistoryEntry};

    fn log_with(cents: i64) -> HistoryLog {
        let mut cart = Cart::new();
        cart.add(&MenuItem::new("A", "Original Recipe", "", Money::from_cents(cents), ""));
        let mut log = HistoryLog::new();
        log.push(HistoryEntry::snapshot(&cart, "1/2/2026", "3:04:05 PM"));
        log
    }

    #[test]
    fn encoding_is_compact_with_sorted_keys() {
        let blob = encode_log(&log_with(599)).unwrap();
        assert_eq!(
            blob,
            r#"[{"date":"1/2/2026","order":[{"description":"","id":"A","image":"","price":"5.99","title":"Original Recipe"}],"time":"3:04:05 PM"}]"#
        );
    }

    #[test]
    fn decode_accepts_numeric_prices_from_older_clients() {
        let blob = r#"[{"date":"1/2/2026","time":"3:04:05 PM","order":[{"id":"A","title":"Original Recipe","description":"","price":5.99,"image":""}]}]"#;
        assert_eq!(decode_log(blob).unwrap(), log_with(599));
    }

    #[test]
    fn decode_rejects_wrong_shape() {
        for blob in ["{}", "not json", r#"[{"date":"d"}]"#, r#"[{"date":"d","time":"t","order":[{"id":"A"}]}]"#] {
            assert!(matches!(decode_log(blob), Err(HistoryError::Corrupt { .. })), "{blob}");
        }
    }

    #[test]
    fn decode_rejects_invariant_violations() {
        let blob = r#"[{"date":"d","time":"t","order":[{"id":"A","title":"x","price":"-1"}]}]"#;
        match decode_log(blob) {
            Err(HistoryError::Corrupt { reason }) => assert!(reason.contains("entry #0")),
            other => panic!("expected Corrupt, got {other:?}"),
        }
    }
}
