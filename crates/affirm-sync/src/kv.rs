//! The remote key-value blob surface.
//!
//! Real deployments back this with a platform ubiquitous store; tests and
//! local-only builds use [`MemoryKvStore`] or [`FileKvStore`]. External
//! writers (other devices) surface through the `watch` channel at
//! unspecified times.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use directories::ProjectDirs;
use tokio::fs;
use tokio::sync::broadcast;

use crate::error::{Result, SyncError};

/// Capacity of the external-change broadcast channel.
const WATCH_CAPACITY: usize = 16;

/// A small, eventually-consistent key-value store holding whole-value
/// JSON blobs. Last writer for a key wins entirely.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read the blob under `key`, or `None` if the key was never written.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Replace the blob under `key` with `value`.
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()>;

    /// Subscribe to external-change notifications. Each message carries
    /// the key that changed on another device.
    fn watch(&self) -> broadcast::Receiver<String>;
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// In-memory [`KvStore`]. Clones share the same map, so a clone can stand
/// in for "another device" in tests via [`MemoryKvStore::set_external`].
#[derive(Clone)]
pub struct MemoryKvStore {
    inner: Arc<RwLock<HashMap<String, serde_json::Value>>>,
    watch_tx: broadcast::Sender<String>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        let (watch_tx, _) = broadcast::channel(WATCH_CAPACITY);
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            watch_tx,
        }
    }

    /// Write a blob as if another device had pushed it: the value is
    /// stored and every watcher is notified of the external change.
    pub fn set_external(&self, key: &str, value: serde_json::Value) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key.to_string(), value);
        }
        let _ = self.watch_tx.send(key.to_string());
    }
}

impl Default for MemoryKvStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        let map = self
            .inner
            .read()
            .map_err(|_| SyncError::Blob("kv lock poisoned".to_string()))?;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| SyncError::Blob("kv lock poisoned".to_string()))?;
        map.insert(key.to_string(), value);
        Ok(())
    }

    fn watch(&self) -> broadcast::Receiver<String> {
        self.watch_tx.subscribe()
    }
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// [`KvStore`] persisting one JSON file per key under a base directory.
/// Used by desktop builds where no ubiquitous store exists; it never
/// observes external writers, so its watch channel stays silent.
pub struct FileKvStore {
    base_path: PathBuf,
    watch_tx: broadcast::Sender<String>,
}

impl FileKvStore {
    /// Open the default blob directory: `AFFIRM_SYNC_DIR` when set,
    /// otherwise `<platform data dir>/sync`.
    pub async fn open_default() -> Result<Self> {
        let base_path = match std::env::var("AFFIRM_SYNC_DIR") {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => ProjectDirs::from("app", "affirm", "affirm")
                .map(|dirs| dirs.data_dir().join("sync"))
                .ok_or_else(|| {
                    SyncError::Blob("Could not determine application data directory".to_string())
                })?,
        };
        Self::new(base_path).await
    }

    pub async fn new(base_path: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_path).await.map_err(|e| {
            SyncError::Blob(format!(
                "Failed to create blob directory '{}': {}",
                base_path.display(),
                e
            ))
        })?;

        tracing::info!(path = %base_path.display(), "file blob store initialized");

        let (watch_tx, _) = broadcast::channel(WATCH_CAPACITY);
        Ok(Self {
            base_path,
            watch_tx,
        })
    }

    /// Keys become file names; reject anything that could traverse out of
    /// the base directory.
    fn safe_key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(SyncError::Blob(format!("Invalid blob key: {key:?}")));
        }
        Ok(self.base_path.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KvStore for FileKvStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        let path = self.safe_key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read(&path).await?;
        let value = serde_json::from_slice(&data)?;

        tracing::debug!(key, size = data.len(), "read blob");
        Ok(Some(value))
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()> {
        let path = self.safe_key_path(key)?;
        let data = serde_json::to_vec(&value)?;

        fs::write(&path, &data)
            .await
            .map_err(|e| SyncError::Blob(format!("Failed to write blob {key}: {e}")))?;

        tracing::debug!(key, size = data.len(), "wrote blob");
        Ok(())
    }

    fn watch(&self) -> broadcast::Receiver<String> {
        self.watch_tx.subscribe()
    }
}
