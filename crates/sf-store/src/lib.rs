//! sf-store
//!
//! Key-value persistence boundary.
//!
//! This crate defines **only** the opaque string store the history layer
//! writes through, plus two concrete backends:
//! - [`MemoryStore`]: process-local map, used by tests and ephemeral sessions
//! - [`FileStore`]: one file per key inside a directory
//!
//! No serialization, no history semantics and no retry policy belong here.
//! Writes are last-write-wins per key.

use std::fmt;

use async_trait::async_trait;

mod file;
mod memory;

#[cfg(any(test, feature = "testkit"))]
mod faults;

pub use file::FileStore;
pub use memory::MemoryStore;

#[cfg(any(test, feature = "testkit"))]
pub use faults::FaultInjectingStore;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors a [`KeyValueStore`] implementation may return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Key contains characters the backend cannot address.
    InvalidKey(String),
    /// Underlying IO failed.
    Io { key: String, message: String },
    /// The backend refused the operation (offline, quota, injected fault).
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidKey(key) => write!(f, "invalid store key '{key}'"),
            StoreError::Io { key, message } => write!(f, "store io error on '{key}': {message}"),
            StoreError::Unavailable(msg) => write!(f, "store unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

/// An opaque, asynchronous get/set-by-key string store.
///
/// Implementations must be `Send + Sync` so a single store can be shared
/// behind an `Arc` by the session and the history layer.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Human-readable backend name for logs (e.g. `"memory"`, `"file"`).
    fn name(&self) -> &'static str;

    /// `Ok(None)` when the key has never been written (or was removed).
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`; removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Keys are restricted to a portable character set so every backend can
/// address them (file names included).
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && !key.starts_with('.');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
