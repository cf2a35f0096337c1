//! sf-history
//!
//! Append-only order history persisted through a [`KeyValueStore`].
//!
//! The entire [`HistoryLog`] lives under one fixed key. Appending is a
//! read-modify-write of that single value; [`HistoryStore`] serializes those
//! through an async mutex so two overlapping submissions cannot drop each
//! other's entry.
//!
//! # Failure policy
//! - read failure during `load`: [`HistoryError::Read`]; views use
//!   [`HistoryStore::load_or_empty`], which logs and shows an empty history
//! - corrupt blob during `load`: [`HistoryError::Corrupt`]; same view policy
//! - read failure during `append`: the append is aborted (nothing is written
//!   over data we could not see)
//! - corrupt blob during `append`: logged, considered lost, replaced by a log
//!   holding only the new entry
//! - write failure during `append`: [`HistoryError::Write`]; the caller keeps
//!   its cart

use std::fmt;
use std::sync::Arc;

use sf_order::{HistoryEntry, HistoryLog};
use sf_store::{KeyValueStore, StoreError};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub mod codec;

pub use codec::{decode_log, encode_log};

/// Store key holding the serialized log.
pub const DEFAULT_HISTORY_KEY: &str = "orderHistory";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// The store could not be read.
    Read(StoreError),
    /// The store rejected the write; nothing was saved.
    Write(StoreError),
    /// The stored value is not a valid history log.
    Corrupt { reason: String },
    /// The log could not be serialized.
    Encode(String),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::Read(e) => write!(f, "order history could not be read: {e}"),
            HistoryError::Write(e) => write!(f, "order history could not be saved: {e}"),
            HistoryError::Corrupt { reason } => write!(f, "order history is corrupt: {reason}"),
            HistoryError::Encode(msg) => write!(f, "order history could not be encoded: {msg}"),
        }
    }
}

impl std::error::Error for HistoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HistoryError::Read(e) | HistoryError::Write(e) => Some(e),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// HistoryStore
// ---------------------------------------------------------------------------

pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
    /// Held across the read and the write of every append.
    append_lock: Mutex<()>,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, DEFAULT_HISTORY_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            append_lock: Mutex::new(()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Absent key -> empty log.
    pub async fn load(&self) -> Result<HistoryLog, HistoryError> {
        match self.store.get(&self.key).await.map_err(HistoryError::Read)? {
            None => Ok(HistoryLog::new()),
            Some(blob) => decode_log(&blob),
        }
    }

    /// Load for display: read and corrupt errors degrade to an empty log.
    pub async fn load_or_empty(&self) -> HistoryLog {
        match self.load().await {
            Ok(log) => log,
            Err(e) => {
                warn!(key = %self.key, store = self.store.name(), "showing empty history: {e}");
                HistoryLog::new()
            }
        }
    }

    /// Append `entry` at the tail and write the full log back.
    /// Returns the new number of entries.
    pub async fn append(&self, entry: HistoryEntry) -> Result<usize, HistoryError> {
        let _guard = self.append_lock.lock().await;

        let mut log = match self.load().await {
            Ok(log) => log,
            Err(HistoryError::Corrupt { reason }) => {
                warn!(key = %self.key, "discarding corrupt order history: {reason}");
                HistoryLog::new()
            }
            Err(e) => return Err(e),
        };

        log.push(entry);
        let blob = encode_log(&log)?;
        self.store
            .set(&self.key, &blob)
            .await
            .map_err(HistoryError::Write)?;

        debug!(key = %self.key, entries = log.len(), bytes = blob.len(), "history written");
        Ok(log.len())
    }

    /// Remove the persisted log entirely.
    pub async fn clear(&self) -> Result<(), HistoryError> {
        let _guard = self.append_lock.lock().await;
        self.store
            .remove(&self.key)
            .await
            .map_err(HistoryError::Write)?;
        info!(key = %self.key, "order history cleared");
        Ok(())
    }
}

impl fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryStore")
            .field("store", &self.store.name())
            .field("key", &self.key)
            .finish()
    }
}
