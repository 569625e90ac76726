//! In-process settings store

use crate::error::ThemingResult;
use crate::store::SettingsStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// Settings held in memory only
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: RwLock<HashMap<(String, String), String>>,
}

impl MemorySettingsStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get_value(&self, namespace: &str, key: &str) -> Option<String> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        values
            .get(&(namespace.to_string(), key.to_string()))
            .cloned()
    }

    async fn set_value(&self, namespace: &str, key: &str, value: &str) -> ThemingResult<()> {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.insert((namespace.to_string(), key.to_string()), value.to_string());
        Ok(())
    }

    async fn delete_value(&self, namespace: &str, key: &str) -> ThemingResult<()> {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.remove(&(namespace.to_string(), key.to_string()));
        Ok(())
    }
}
