//! JSON-file settings store
//!
//! The whole document is loaded at open and rewritten on every mutation.
//! A mutation only becomes visible after the file write succeeded. Writers
//! are serialized, so each one starts from the previous writer's document.

use crate::error::{ThemingError, ThemingResult};
use crate::store::SettingsStore;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

/// namespace -> key -> value
type Document = BTreeMap<String, BTreeMap<String, String>>;

/// Settings persisted to a single JSON document
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    document: RwLock<Document>,
    /// Held from snapshot to swap
    write_lock: Mutex<()>,
}

impl FileSettingsStore {
    /// Open the store, starting empty if the file does not exist yet
    pub async fn open(path: impl Into<PathBuf>) -> ThemingResult<Self> {
        let path = path.into();

        let document = if path.exists() {
            let content = fs::read_to_string(&path).await.map_err(|e| {
                ThemingError::io(format!("reading settings file {}", path.display()), e)
            })?;
            serde_json::from_str(&content)?
        } else {
            debug!("Settings file {} not found, starting empty", path.display());
            Document::new()
        };

        Ok(Self::with_document(path, document))
    }

    fn with_document(path: PathBuf, document: Document) -> Self {
        Self {
            path,
            document: RwLock::new(document),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn snapshot(&self) -> Document {
        self.document
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    async fn commit(&self, key: &str, document: Document) -> ThemingResult<()> {
        self.persist(&document)
            .await
            .map_err(|e| ThemingError::SettingsPersist {
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        *self.document.write().unwrap_or_else(|e| e.into_inner()) = document;
        Ok(())
    }

    async fn persist(&self, document: &Document) -> ThemingResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ThemingError::io("creating settings directory", e))?;
        }

        let content = serde_json::to_string_pretty(document)?;
        let tmp = self.path.with_extension("json.tmp");

        fs::write(&tmp, content)
            .await
            .map_err(|e| ThemingError::io(format!("writing settings file {}", tmp.display()), e))?;
        fs::rename(&tmp, &self.path).await.map_err(|e| {
            ThemingError::io(format!("replacing settings file {}", self.path.display()), e)
        })?;

        Ok(())
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn get_value(&self, namespace: &str, key: &str) -> Option<String> {
        let document = self.document.read().unwrap_or_else(|e| e.into_inner());
        document.get(namespace).and_then(|ns| ns.get(key)).cloned()
    }

    async fn set_value(&self, namespace: &str, key: &str, value: &str) -> ThemingResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.snapshot();
        document
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());

        self.commit(key, document).await?;
        debug!("Stored setting {}.{}", namespace, key);
        Ok(())
    }

    async fn delete_value(&self, namespace: &str, key: &str) -> ThemingResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.snapshot();
        let removed = document
            .get_mut(namespace)
            .and_then(|ns| ns.remove(key))
            .is_some();

        if !removed {
            return Ok(());
        }

        if document.get(namespace).is_some_and(|ns| ns.is_empty()) {
            document.remove(namespace);
        }

        self.commit(key, document).await?;
        debug!("Deleted setting {}.{}", namespace, key);
        Ok(())
    }
}
