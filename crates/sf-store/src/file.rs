use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use crate::{validate_key, KeyValueStore, StoreError};

/// One file per key inside `dir`.
///
/// `set` writes `.<key>.tmp` and renames it over `<key>`, so a reader never
/// observes a half-written value. Keys cannot start with `.`, so the temp
/// name never collides with a stored key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates the store and ensures the directory exists.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).with_context(|| format!("create_dir_all {:?}", dir))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(key))
    }
}

fn io_err(key: &str, e: std::io::Error) -> StoreError {
    StoreError::Io {
        key: key.to_string(),
        message: e.to_string(),
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(v) => Ok(Some(v)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_err(key, e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!(".{key}.tmp"));
        if let Err(e) = tokio::fs::write(&tmp, value.as_bytes()).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(io_err(key, e));
        }
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(io_err(key, e));
        }
        debug!(key, bytes = value.len(), "file store write {:?}", path);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_err(key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn values_survive_a_new_handle() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileStore::new(dir.path()).unwrap();
            store.set("orderHistory", "[]").await.unwrap();
        }
        let reopened = FileStore::new(dir.path()).unwrap();
        assert_eq!(
            reopened.get("orderHistory").await.unwrap().as_deref(),
            Some("[]")
        );
        assert!(!dir.path().join(".orderHistory.tmp").exists());
    }

    #[tokio::test]
    async fn temp_file_never_shadows_a_tmp_suffixed_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        store.set("a.tmp", "keep").await.unwrap();
        store.set("a", "new").await.unwrap();
        assert_eq!(store.get("a.tmp").await.unwrap().as_deref(), Some("keep"));
        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn failed_rename_cleans_up_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        std::fs::create_dir(dir.path().join("blocked")).unwrap();
        std::fs::write(dir.path().join("blocked").join("child"), "x").unwrap();

        assert!(matches!(
            store.set("blocked", "v").await,
            Err(StoreError::Io { .. })
        ));
        assert!(!dir.path().join(".blocked.tmp").exists());
    }

    #[tokio::test]
    async fn absent_key_is_none_and_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested")).unwrap();
        assert_eq!(store.get("missing").await.unwrap(), None);
        store.remove("missing").await.unwrap();

        store.set("k", "v").await.unwrap();
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn traversal_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        assert!(matches!(
            store.set("../escape", "x").await,
            Err(StoreError::InvalidKey(_))
        ));
    }
}
