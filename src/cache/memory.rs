//! In-process distributed cache
//!
//! Every handle created from the same `MemoryCache` (or its clones) sees the
//! same buckets.

use crate::cache::{CacheHandle, CacheNamespace, DistributedCache};
use crate::error::ThemingResult;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type Buckets = Arc<Mutex<HashMap<String, HashMap<String, Value>>>>;

/// Shared in-memory cache buckets
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    buckets: Buckets,
}

impl MemoryCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently stored in a namespace
    pub fn len(&self, namespace: &CacheNamespace) -> usize {
        let buckets = self.buckets.lock().unwrap_or_else(|e| e.into_inner());
        buckets
            .get(&namespace.to_string())
            .map_or(0, |bucket| bucket.len())
    }

    /// Whether a namespace holds no entries
    pub fn is_empty(&self, namespace: &CacheNamespace) -> bool {
        self.len(namespace) == 0
    }
}

impl DistributedCache for MemoryCache {
    fn create(&self, namespace: &CacheNamespace) -> Box<dyn CacheHandle> {
        Box::new(MemoryCacheHandle {
            name: namespace.to_string(),
            buckets: Arc::clone(&self.buckets),
        })
    }
}

struct MemoryCacheHandle {
    name: String,
    buckets: Buckets,
}

#[async_trait]
impl CacheHandle for MemoryCacheHandle {
    async fn get(&self, key: &str) -> Option<Value> {
        let buckets = self.buckets.lock().unwrap_or_else(|e| e.into_inner());
        buckets.get(&self.name).and_then(|b| b.get(key)).cloned()
    }

    async fn set(&self, key: &str, value: Value) -> ThemingResult<()> {
        let mut buckets = self.buckets.lock().unwrap_or_else(|e| e.into_inner());
        buckets
            .entry(self.name.clone())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn clear(&self) -> ThemingResult<()> {
        let mut buckets = self.buckets.lock().unwrap_or_else(|e| e.into_inner());
        buckets.remove(&self.name);
        Ok(())
    }
}
