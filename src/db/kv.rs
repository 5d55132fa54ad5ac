// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Key-value storage backends.
//!
//! Provides:
//! - `FileKvStore`: one file per key under a state directory
//! - `MemoryKvStore`: process-local storage for tests and previews

use async_trait::async_trait;
use dashmap::DashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Key-value storage errors.
#[derive(Debug, thiserror::Error)]
pub enum KvError {
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Persistent key-value layer used for session state.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError>;

    /// Delete the value stored under `key`. Missing keys are not an error.
    async fn remove(&self, key: &str) -> Result<(), KvError>;
}

/// File-backed store: each key maps to `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    /// Open the store, creating the state directory if needed.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, KvError> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;
        tracing::debug!(dir = %dir.display(), "Opened key-value store");
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, KvError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
            && !key.starts_with('.');

        if !valid {
            return Err(KvError::InvalidKey(key.to_string()));
        }

        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KeyValueStore for FileKvStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
        let path = self.path_for(key)?;

        // Write-then-rename so a crash never leaves a truncated value behind
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), KvError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store. Contents are lost when the value is dropped.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: DashMap<String, Vec<u8>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), KvError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_store_set_get_remove() {
        let tmp = TempDir::new().unwrap();
        let store = FileKvStore::open(tmp.path().join("state")).await.unwrap();

        assert!(store.get("authState").await.unwrap().is_none());

        store.set("authState", b"{\"user\":null}").await.unwrap();
        assert_eq!(
            store.get("authState").await.unwrap().as_deref(),
            Some(&b"{\"user\":null}"[..])
        );

        store.remove("authState").await.unwrap();
        assert!(store.get("authState").await.unwrap().is_none());

        // Removing again is a no-op
        store.remove("authState").await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let tmp = TempDir::new().unwrap();

        let store = FileKvStore::open(tmp.path()).await.unwrap();
        store.set("supabase.session", b"abc").await.unwrap();
        drop(store);

        let reopened = FileKvStore::open(tmp.path()).await.unwrap();
        assert_eq!(
            reopened.get("supabase.session").await.unwrap(),
            Some(b"abc".to_vec())
        );
    }

    #[tokio::test]
    async fn test_file_store_rejects_path_keys() {
        let tmp = TempDir::new().unwrap();
        let store = FileKvStore::open(tmp.path()).await.unwrap();

        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(
                matches!(store.get(key).await, Err(KvError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryKvStore::new();
        store.set("k", b"v1").await.unwrap();
        store.set("k", b"v2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(b"v2".to_vec()));
        store.remove("k").await.unwrap();
        assert!(store.get("k").await.unwrap().is_none());
    }
}
