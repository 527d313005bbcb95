//! Persistence backends
//!
//! The store only needs an abstract key-value capability: load a raw JSON
//! document by key, replace it whole. The file backend keeps one document
//! per key under a data directory; the memory backend serves tests.

use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;

/// Abstract key-value persistence capability
#[async_trait]
pub trait StoreBackend: Send + Sync + std::fmt::Debug {
    /// Load the raw document stored under `key`, if any
    async fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replace the document stored under `key`
    async fn save(&self, key: &str, raw: &str) -> Result<()>;
}

/// File-per-key backend (`<dir>/<key>.json`)
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `dir`; the directory is created on first write
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl StoreBackend for FileBackend {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, key: &str, raw: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.path_for(key), raw).await?;
        Ok(())
    }
}

/// In-memory backend for tests
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw document (for corruption tests)
    pub async fn seed(&self, key: &str, raw: &str) {
        let mut records = self.records.write().await;
        records.insert(key.to_string(), raw.to_string());
    }
}

#[async_trait]
impl StoreBackend for MemoryBackend {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let records = self.records.read().await;
        Ok(records.get(key).cloned())
    }

    async fn save(&self, key: &str, raw: &str) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(key.to_string(), raw.to_string());
        Ok(())
    }
}
