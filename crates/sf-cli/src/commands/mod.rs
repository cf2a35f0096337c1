//! Command handlers for the `sf` binary.
//!
//! Shared wiring (config, catalog, store, session) lives here; the screens
//! live in the submodules.

pub mod menu;
pub mod order;

use std::sync::Arc;

use anyhow::{Context, Result};
use sf_catalog::Catalog;
use sf_config::{report_unused_keys, LoadedConfig, StorefrontConfig, UnusedKeyPolicy};
use sf_history::HistoryStore;
use sf_session::{Session, SessionSettings};
use sf_store::{FileStore, KeyValueStore};
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Merge the layered config (defaults when no paths are given) and apply
/// environment overrides.
pub fn load_config(paths: &[String]) -> Result<StorefrontConfig> {
    let cfg = if paths.is_empty() {
        StorefrontConfig::default()
    } else {
        let loaded = load_layers(paths)?;
        let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)?;
        if !report.is_clean() {
            warn!(keys = ?report.unused_leaf_pointers, "unused config keys");
        }
        StorefrontConfig::from_config_json(&loaded.config_json)?
    };
    Ok(cfg.with_env_overrides())
}

pub fn load_layers(paths: &[String]) -> Result<LoadedConfig> {
    let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    sf_config::load_layered_yaml(&path_refs)
}

/// Open the history store in the configured directory.
pub fn open_history(cfg: &StorefrontConfig) -> Result<Arc<HistoryStore>> {
    let store: Arc<dyn KeyValueStore> = Arc::new(
        FileStore::new(&cfg.store_dir)
            .with_context(|| format!("open store dir: {}", cfg.store_dir))?,
    );
    Ok(Arc::new(HistoryStore::with_key(store, cfg.history_key.as_str())))
}

/// Config, catalog, store and a fresh session. `--catalog` wins over
/// `/catalog/path`.
pub fn open_session(config_paths: &[String], catalog_flag: Option<&str>) -> Result<Session> {
    let config = load_config(config_paths)?;

    let catalog_path = catalog_flag
        .or(config.catalog_path.as_deref())
        .context("no catalog: pass --catalog or set /catalog/path in config")?;
    let catalog = Arc::new(Catalog::load_file(catalog_path)?);

    let history = open_history(&config)?;
    let settings = SessionSettings::from_config(&config).context("invalid locale config")?;
    let session = Session::new(catalog, history, settings);

    info!(
        session = %session.id(),
        store_dir = %config.store_dir,
        history_key = %config.history_key,
        "storefront ready"
    );

    Ok(session)
}
