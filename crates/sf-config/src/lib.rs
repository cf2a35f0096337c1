//! sf-config
//!
//! Layered YAML configuration for the storefront.
//!
//! - YAML documents are merged in order: earlier docs are the base, later
//!   docs override (objects merge key by key, everything else replaces).
//! - The merged document is converted to JSON, checked for secret-looking
//!   literals, serialized canonically and hashed with SHA-256.
//! - [`report_unused_keys`] lists config leaves nothing reads, using the
//!   registry in [`CONSUMED_POINTERS`].
//! - [`StorefrontConfig`] is the typed view the session and CLI consume.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs;

mod storefront;

pub use storefront::{StorefrontConfig, ENV_STORE_DIR};

/// `sf config-hash` echoes the canonical config to stdout and the hash ends
/// up in logs, so payment-provider keys and image-bucket credentials pasted
/// into a storefront config must never get that far. A leaf string starting
/// with one of these aborts loading with CONFIG_SECRET_DETECTED.
const SECRET_PREFIXES: &[&str] = &[
    "sk_live_",   // Stripe secret key
    "sk_test_",   // Stripe test secret key
    "rk_live_",   // Stripe restricted key
    "AKIA",       // AWS access key id (S3 image bucket)
    "-----BEGIN", // PEM private key
];

// ---------------------------------------------------------------------------
// Consumed-key registry
// ---------------------------------------------------------------------------

/// JSON pointers `StorefrontConfig::from_config_json` reads. A leaf at or
/// below one of these is consumed; any other leaf is reported as unused.
pub const CONSUMED_POINTERS: &[&str] = &[
    "/storefront/title",
    "/catalog/path",
    "/store/dir",
    "/store/history_key",
    "/locale/date_format",
    "/locale/time_format",
    "/currency/symbol",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusedKeyReport {
    /// Sorted copy of [`CONSUMED_POINTERS`].
    pub consumed_prefixes: Vec<String>,
    /// Sorted, unique.
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

/// List config leaves no storefront setting reads. Under `Fail` a non-empty
/// list is an error.
pub fn report_unused_keys(config_json: &Value, policy: UnusedKeyPolicy) -> Result<UnusedKeyReport> {
    let consumed_prefixes: Vec<String> = CONSUMED_POINTERS
        .iter()
        .map(|p| p.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let unused_leaf_pointers: Vec<String> = leaves(config_json)
        .into_iter()
        .map(|(ptr, _)| ptr)
        .filter(|ptr| !consumed_prefixes.iter().any(|c| is_at_or_below(ptr, c)))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let report = UnusedKeyReport {
        consumed_prefixes,
        unused_leaf_pointers,
    };

    if policy == UnusedKeyPolicy::Fail && !report.is_clean() {
        let first: Vec<&str> = report
            .unused_leaf_pointers
            .iter()
            .take(12)
            .map(String::as_str)
            .collect();
        bail!(
            "CONFIG_UNUSED_KEYS: {} unused config key(s); remove them or teach \
            StorefrontConfig to read them. First few: {:?}",
            report.unused_leaf_pointers.len(),
            first
        );
    }

    Ok(report)
}

/// `/store/dir` is at or below `/store` but `/storefront/title` is not.
fn is_at_or_below(ptr: &str, prefix: &str) -> bool {
    match ptr.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Every scalar with its JSON pointer, in document order. Empty objects and
/// arrays contribute nothing.
fn leaves(root: &Value) -> Vec<(String, &Value)> {
    fn walk<'a>(v: &'a Value, ptr: String, out: &mut Vec<(String, &'a Value)>) {
        match v {
            Value::Object(map) => {
                for (k, child) in map {
                    let token = k.replace('~', "~0").replace('/', "~1");
                    walk(child, format!("{ptr}/{token}"), out);
                }
            }
            Value::Array(items) => {
                for (i, child) in items.iter().enumerate() {
                    walk(child, format!("{ptr}/{i}"), out);
                }
            }
            _ => out.push((if ptr.is_empty() { "/".to_string() } else { ptr }, v)),
        }
    }

    let mut out = Vec::new();
    walk(root, String::new(), &mut out);
    out
}

// ---------------------------------------------------------------------------
// Layered loading + hashing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// SHA-256 of `canonical_json`, lowercase hex.
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
}

pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedConfig> {
    let docs = paths
        .iter()
        .map(|p| fs::read_to_string(p).with_context(|| format!("read config layer: {p}")))
        .collect::<Result<Vec<_>>>()?;
    let doc_refs: Vec<&str> = docs.iter().map(String::as_str).collect();
    load_layered_yaml_from_strings(&doc_refs)
}

pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let mut merged = Value::Object(serde_json::Map::new());
    for (i, raw) in yaml_docs.iter().enumerate() {
        let layer: serde_yaml::Value =
            serde_yaml::from_str(raw).with_context(|| format!("config layer #{i} is not valid yaml"))?;
        let layer = serde_json::to_value(layer)
            .with_context(|| format!("config layer #{i} has no json form"))?;
        merge_into(&mut merged, layer);
    }

    reject_secret_literals(&merged)?;

    // serde_json::Map is key-ordered, so compact output is canonical.
    let canonical_json = serde_json::to_string(&merged).context("serialize canonical config")?;
    let config_hash = hex::encode(Sha256::digest(canonical_json.as_bytes()));
    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json: merged,
    })
}

/// Objects merge key by key; anything else in `layer` replaces `base`.
fn merge_into(base: &mut Value, layer: Value) {
    match (base, layer) {
        (Value::Object(base_map), Value::Object(layer_map)) => {
            for (k, v) in layer_map {
                match base_map.get_mut(&k) {
                    Some(existing) => merge_into(existing, v),
                    None => {
                        base_map.insert(k, v);
                    }
                }
            }
        }
        (slot, other) => *slot = other,
    }
}

fn reject_secret_literals(config: &Value) -> Result<()> {
    let hit = leaves(config).into_iter().find(|(_, v)| {
        v.as_str().is_some_and(|s| {
            let s = s.trim();
            s.len() >= 8 && SECRET_PREFIXES.iter().any(|p| s.starts_with(p))
        })
    });
    if let Some((ptr, _)) = hit {
        bail!("CONFIG_SECRET_DETECTED leaf={ptr} value=REDACTED");
    }
    Ok(())
}
