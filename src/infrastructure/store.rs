//! String-keyed persistent store

use crate::error::{Result, TravelogError};
use async_trait::async_trait;
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Asynchronous key-value store. No transactions, no schema.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the text under `key`, `None` when absent.
    /// Bytes that are not text fail with `CorruptStore`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the text under `key`
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`; absent keys are not an error
    async fn remove(&self, key: &str) -> Result<()>;

    /// Delete every key
    async fn clear(&self) -> Result<()>;
}

fn key_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap())
}

const EXTENSION: &str = "json";

/// Store backed by one file per key in a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        FileStore { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if !key_regex().is_match(key) {
            return Err(TravelogError::storage(key, "invalid key"));
        }
        Ok(self.dir.join(format!("{}.{}", key, EXTENSION)))
    }

    async fn ensure_dir(&self, key: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| TravelogError::storage(key, e))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                trace!(key, "store get: absent");
                return Ok(None);
            }
            Err(e) => return Err(TravelogError::storage(key, e)),
        };

        trace!(key, bytes = bytes.len(), "store get");
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| TravelogError::corrupt(key, e))
    }

    /// Write to a temp file in the same directory, then rename into place.
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        self.ensure_dir(key).await?;

        let tmp_path = self
            .dir
            .join(format!("{}.tmp-{}", key, std::process::id()));
        fs::write(&tmp_path, value)
            .await
            .map_err(|e| TravelogError::storage(key, e))?;
        if let Err(e) = fs::rename(&tmp_path, &path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(TravelogError::storage(key, e));
        }

        trace!(key, bytes = value.len(), "store set");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TravelogError::storage(key, e)),
        }
    }

    async fn clear(&self) -> Result<()> {
        if !self.dir.exists() {
            return Ok(());
        }

        let files: Vec<PathBuf> = WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(EXTENSION))
            .collect();

        for path in &files {
            fs::remove_file(path)
                .await
                .map_err(|e| TravelogError::storage("*", e))?;
        }

        debug!(removed = files.len(), "store cleared");
        Ok(())
    }
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub async fn len(&self) -> usize {
        self.values.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.values.lock().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self.values.lock().await.get(key).cloned();
        // Suspend like a platform store would, so interleavings are observable
        tokio::task::yield_now().await;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        tokio::task::yield_now().await;
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.values.lock().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.values.lock().await.clear();
        Ok(())
    }
}
