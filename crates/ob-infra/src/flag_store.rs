//! File-based flag store.
//!
//! Persists the onboarding flags to a single JSON object file in the
//! application data directory. Every `set`/`delete` rewrites the file
//! and syncs it before returning, so each flag is durable on its own;
//! there is no multi-key atomicity and callers must tolerate any
//! individually-stale subset after a crash.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::warn;

use ob_core::error::FlagStoreError;
use ob_core::ports::FlagStorePort;

pub const DEFAULT_FLAGS_FILE: &str = ".onboarding_flags";

pub struct FileFlagStore {
    flags_file_path: PathBuf,
    // Serializes read-modify-write cycles on the backing file.
    write_lock: Mutex<()>,
}

impl FileFlagStore {
    /// Create a store with a custom file path.
    pub fn new(flags_file_path: PathBuf) -> Self {
        Self {
            flags_file_path,
            write_lock: Mutex::new(()),
        }
    }

    /// Create a store with the default filename under `base_dir`.
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self::new(base_dir.join(DEFAULT_FLAGS_FILE))
    }

    async fn ensure_parent_dir(&self) -> Result<(), FlagStoreError> {
        if let Some(parent) = self.flags_file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    async fn load(&self) -> Result<BTreeMap<String, Value>, FlagStoreError> {
        if !self.flags_file_path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.flags_file_path).await?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        match serde_json::from_str(&content) {
            Ok(map) => Ok(map),
            // A torn write must not brick the flow; start over and let
            // the orchestrator re-derive what it can.
            Err(e) => {
                warn!(error = %e, path = %self.flags_file_path.display(),
                    "flag file unreadable, treating as empty");
                Ok(BTreeMap::new())
            }
        }
    }

    async fn persist(&self, map: &BTreeMap<String, Value>) -> Result<(), FlagStoreError> {
        self.ensure_parent_dir().await?;
        let json = serde_json::to_string_pretty(map)?;
        let mut file = fs::File::create(&self.flags_file_path).await?;
        file.write_all(json.as_bytes()).await?;
        file.sync_all().await?;
        Ok(())
    }
}

#[async_trait]
impl FlagStorePort for FileFlagStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, FlagStoreError> {
        let _guard = self.write_lock.lock().await;
        Ok(self.load().await?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), FlagStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load().await?;
        map.insert(key.to_string(), value);
        self.persist(&map).await
    }

    async fn delete(&self, key: &str) -> Result<(), FlagStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load().await?;
        if map.remove(key).is_some() {
            self.persist(&map).await?;
        }
        Ok(())
    }
}
