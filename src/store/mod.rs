//! Persistent key/value settings storage
//!
//! Overrides are namespaced by a product key ([`THEMING_NAMESPACE`]) and
//! addressed by setting key. Reads are total: an absent key is `None`,
//! never an error.

mod file;
mod memory;

pub use file::FileSettingsStore;
pub use memory::MemorySettingsStore;

use crate::error::ThemingResult;
use async_trait::async_trait;

/// Namespace holding every theming override and the cache-buster counter
pub const THEMING_NAMESPACE: &str = "theming";

/// Abstract settings storage
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read a stored value
    async fn get_value(&self, namespace: &str, key: &str) -> Option<String>;

    /// Persist a value, replacing any previous one
    async fn set_value(&self, namespace: &str, key: &str, value: &str) -> ThemingResult<()>;

    /// Remove a value (no-op when absent)
    async fn delete_value(&self, namespace: &str, key: &str) -> ThemingResult<()>;

    /// Read a stored value, substituting `default` when absent
    async fn get_value_or(&self, namespace: &str, key: &str, default: &str) -> String {
        self.get_value(namespace, key)
            .await
            .unwrap_or_else(|| default.to_string())
    }
}
