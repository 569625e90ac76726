//! Monotonic cache-buster version
//!
//! The version is stored next to the overrides and appended to every
//! derived URL as `?v=<version>`. Increasing it also clears the variable
//! and image-path namespaces of the instance.

use crate::cache::{DistributedCache, InstanceNamespaces};
use crate::error::{ThemingError, ThemingResult};
use crate::store::{SettingsStore, THEMING_NAMESPACE};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Setting key of the version counter
pub const CACHE_BUSTER_KEY: &str = "cachebuster";

/// Read the stored version, failing on a value that is not a number
pub async fn stored_version(store: &dyn SettingsStore) -> ThemingResult<u64> {
    match store.get_value(THEMING_NAMESPACE, CACHE_BUSTER_KEY).await {
        None => Ok(0),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ThemingError::CorruptVersion(raw)),
    }
}

/// Read the current version for URL tagging (0 when never written or unreadable)
pub async fn current_version(store: &dyn SettingsStore) -> u64 {
    stored_version(store).await.unwrap_or_else(|e| {
        warn!("{}", e);
        0
    })
}

/// Append the version tag to a URL
pub fn versioned(url: &str, version: u64) -> String {
    format!("{}?v={}", url, version)
}

/// Per-instance cache-buster counter
///
/// Clones share one lock, so increases from the same process never hand
/// out the same version twice.
#[derive(Clone)]
pub struct CacheBuster {
    store: Arc<dyn SettingsStore>,
    cache: Arc<dyn DistributedCache>,
    namespaces: InstanceNamespaces,
    lock: Arc<Mutex<()>>,
}

impl CacheBuster {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        cache: Arc<dyn DistributedCache>,
        namespaces: InstanceNamespaces,
    ) -> Self {
        Self {
            store,
            cache,
            namespaces,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Current version
    pub async fn current(&self) -> u64 {
        current_version(self.store.as_ref()).await
    }

    /// Current version, or `CorruptVersion` when the stored value is unreadable
    pub async fn stored(&self) -> ThemingResult<u64> {
        stored_version(self.store.as_ref()).await
    }

    /// Persist `current + 1`, then clear the derived namespaces
    ///
    /// The version is left unchanged when persisting fails or the stored
    /// value is unreadable. Capability results are not touched.
    pub async fn increase(&self) -> ThemingResult<u64> {
        let _guard = self.lock.lock().await;
        let next = self.stored().await? + 1;
        self.store
            .set_value(THEMING_NAMESPACE, CACHE_BUSTER_KEY, &next.to_string())
            .await?;

        for namespace in [&self.namespaces.variables, &self.namespaces.image_paths] {
            self.cache.create(namespace).clear().await?;
            debug!("Cleared cache namespace {}", namespace);
        }

        info!("Cache buster increased to {}", next);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::store::MemorySettingsStore;
    use serde_json::json;

    fn buster() -> (CacheBuster, Arc<MemorySettingsStore>, MemoryCache, InstanceNamespaces) {
        let store = Arc::new(MemorySettingsStore::new());
        let cache = MemoryCache::new();
        let namespaces = InstanceNamespaces::for_instance("https://cloud.test");
        let buster = CacheBuster::new(store.clone(), Arc::new(cache.clone()), namespaces.clone());
        (buster, store, cache, namespaces)
    }

    #[tokio::test]
    async fn starts_at_zero_and_increments() {
        let (buster, _, _, _) = buster();

        assert_eq!(buster.current().await, 0);
        assert_eq!(buster.increase().await.unwrap(), 1);
        assert_eq!(buster.increase().await.unwrap(), 2);
        assert_eq!(buster.current().await, 2);
    }

    #[tokio::test]
    async fn garbage_value_reads_as_zero_but_blocks_increase() {
        let (buster, store, cache, ns) = buster();
        store
            .set_value(THEMING_NAMESPACE, CACHE_BUSTER_KEY, "abc")
            .await
            .unwrap();
        cache.create(&ns.variables).set("vars", json!({})).await.unwrap();

        assert_eq!(buster.current().await, 0);
        let err = buster.increase().await.unwrap_err();
        assert!(matches!(err, ThemingError::CorruptVersion(_)));

        // Nothing was reset or cleared
        assert_eq!(
            store.get_value(THEMING_NAMESPACE, CACHE_BUSTER_KEY).await.as_deref(),
            Some("abc")
        );
        assert_eq!(cache.len(&ns.variables), 1);
    }

    #[tokio::test]
    async fn concurrent_increases_never_repeat() {
        let (buster, _, _, _) = buster();
        let other = buster.clone();

        let (a, b, c) = tokio::join!(buster.increase(), other.increase(), buster.increase());
        let mut versions = vec![a.unwrap(), b.unwrap(), c.unwrap()];
        versions.sort_unstable();

        assert_eq!(versions, vec![1, 2, 3]);
        assert_eq!(buster.current().await, 3);
    }

    #[tokio::test]
    async fn increase_clears_derived_namespaces_only() {
        let (buster, _, cache, ns) = buster();
        cache.create(&ns.variables).set("vars", json!({})).await.unwrap();
        cache.create(&ns.image_paths).set("core/favicon.ico", json!(null)).await.unwrap();
        cache.create(&ns.capabilities).set("icons", json!(true)).await.unwrap();

        buster.increase().await.unwrap();

        assert!(cache.is_empty(&ns.variables));
        assert!(cache.is_empty(&ns.image_paths));
        assert_eq!(cache.len(&ns.capabilities), 1);
    }

    #[test]
    fn versioned_appends_query() {
        assert_eq!(versioned("/core/img/logo.svg", 7), "/core/img/logo.svg?v=7");
    }
}
