//! File-backed distributed cache
//!
//! Layout: `<root>/<sha256(namespace)>/<sha256(key)>.json`. Several processes
//! sharing the same root see each other's entries and clears.

use crate::cache::{CacheHandle, CacheNamespace, DistributedCache};
use crate::error::{ThemingError, ThemingResult};
use async_trait::async_trait;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

/// Cache whose namespaces are directories under a common root
#[derive(Debug, Clone)]
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    /// Create a cache rooted at `root` (created lazily on first write)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn namespace_dir(&self, namespace: &CacheNamespace) -> PathBuf {
        self.root.join(digest(&namespace.to_string()))
    }
}

impl DistributedCache for FileCache {
    fn create(&self, namespace: &CacheNamespace) -> Box<dyn CacheHandle> {
        Box::new(FileCacheHandle {
            dir: self.namespace_dir(namespace),
            name: namespace.to_string(),
        })
    }
}

struct FileCacheHandle {
    dir: PathBuf,
    name: String,
}

impl FileCacheHandle {
    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", digest(key)))
    }
}

#[async_trait]
impl CacheHandle for FileCacheHandle {
    async fn get(&self, key: &str) -> Option<Value> {
        let path = self.entry_path(key);

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                debug!("Unreadable cache entry {} in {}: {}", key, self.name, e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("Corrupt cache entry {} in {}: {}", key, self.name, e);
                None
            }
        }
    }

    async fn set(&self, key: &str, value: Value) -> ThemingResult<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ThemingError::io(format!("creating cache namespace {}", self.name), e))?;

        let path = self.entry_path(key);
        let content = serde_json::to_string(&value)?;

        fs::write(&path, content)
            .await
            .map_err(|e| ThemingError::io(format!("writing cache file {}", path.display()), e))?;

        debug!("Cached {} in {}", key, self.name);
        Ok(())
    }

    async fn clear(&self) -> ThemingResult<()> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(ThemingError::io("reading cache directory", e)),
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ThemingError::io("reading cache entry", e))?
        {
            if entry.path().extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(entry.path())
                    .await
                    .map_err(|e| ThemingError::io("removing cache file", e))?;
            }
        }

        debug!("Cleared cache namespace {}", self.name);
        Ok(())
    }
}

fn digest(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}
