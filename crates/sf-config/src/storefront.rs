use anyhow::{anyhow, Result};
use serde_json::Value;

/// Overrides `/store/dir` when set.
pub const ENV_STORE_DIR: &str = "SF_STORE_DIR";

/// Typed storefront settings read from the canonical config JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Menu screen header.
    pub title: String,
    pub catalog_path: Option<String>,
    pub store_dir: String,
    pub history_key: String,
    /// chrono strftime pattern for the history date.
    pub date_format: String,
    /// chrono strftime pattern for the history time.
    pub time_format: String,
    pub currency_symbol: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            title: "Menu".to_string(),
            catalog_path: None,
            store_dir: ".storefront".to_string(),
            history_key: "orderHistory".to_string(),
            date_format: "%-m/%-d/%Y".to_string(),
            time_format: "%-I:%M:%S %p".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

fn opt_str<'a>(cfg: &'a Value, ptr: &str) -> Result<Option<&'a str>> {
    match cfg.pointer(ptr) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(anyhow!("config {ptr} must be a string (got {other})")),
    }
}

impl StorefrontConfig {
    /// Build from canonical config JSON (produced by `load_layered_yaml*`).
    ///
    /// Every key is optional and falls back to [`StorefrontConfig::default`].
    /// Present keys must be strings; `/store/history_key` and the format
    /// patterns must be non-empty, and the history key must be a valid
    /// store key.
    pub fn from_config_json(cfg: &Value) -> Result<Self> {
        let d = Self::default();
        let get = |ptr: &str, default: &str| -> Result<String> {
            Ok(opt_str(cfg, ptr)?.unwrap_or(default).to_string())
        };

        let out = Self {
            title: get("/storefront/title", &d.title)?,
            catalog_path: opt_str(cfg, "/catalog/path")?.map(str::to_string),
            store_dir: get("/store/dir", &d.store_dir)?,
            history_key: get("/store/history_key", &d.history_key)?,
            date_format: get("/locale/date_format", &d.date_format)?,
            time_format: get("/locale/time_format", &d.time_format)?,
            currency_symbol: get("/currency/symbol", &d.currency_symbol)?,
        };

        for (ptr, v) in [
            ("/store/history_key", &out.history_key),
            ("/locale/date_format", &out.date_format),
            ("/locale/time_format", &out.time_format),
        ] {
            if v.trim().is_empty() {
                return Err(anyhow!("config {ptr} must not be empty"));
            }
        }
        sf_store::validate_key(&out.history_key)
            .map_err(|e| anyhow!("config /store/history_key: {e}"))?;

        Ok(out)
    }

    /// Apply environment overrides (`SF_STORE_DIR`).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = std::env::var(ENV_STORE_DIR) {
            if !dir.trim().is_empty() {
                self.store_dir = dir;
            }
        }
        self
    }
}
