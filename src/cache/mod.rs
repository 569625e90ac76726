//! Distributed cache for derived theming data
//!
//! Entries live in namespaces scoped to one instance. The only
//! invalidation primitive is clearing a whole namespace; there is no TTL.
//!
//! # Namespaces
//!
//! | Namespace | Holds | Cleared by |
//! |-----------|-------|------------|
//! | `theming-<base>` | derived variable set | every settings write |
//! | `imagePath-<base>` | image replacement decisions | every settings write |
//! | `theming-capabilities-<base>` | icon rasterization probe | never (environment) |
//!
//! `get` returns `Option` so an absent entry is distinct from a cached
//! `false` or empty value.

mod file;
mod memory;

pub use file::FileCache;
pub use memory::MemoryCache;

use crate::error::ThemingResult;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// A cache bucket name derived from a product key and an instance identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheNamespace {
    product: &'static str,
    instance: String,
}

impl CacheNamespace {
    /// Create a namespace for `product` on `instance`
    pub fn new(product: &'static str, instance: impl Into<String>) -> Self {
        Self {
            product,
            instance: instance.into(),
        }
    }

    /// Derived variable set for an instance
    pub fn variables(instance: &str) -> Self {
        Self::new("theming", instance)
    }

    /// Image replacement decisions for an instance
    pub fn image_paths(instance: &str) -> Self {
        Self::new("imagePath", instance)
    }

    /// Environment capability results for an instance
    pub fn capabilities(instance: &str) -> Self {
        Self::new("theming-capabilities", instance)
    }

    /// Product key part
    pub fn product(&self) -> &str {
        self.product
    }

    /// Instance identifier part
    pub fn instance(&self) -> &str {
        &self.instance
    }
}

impl fmt::Display for CacheNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.product, self.instance)
    }
}

/// The namespaces used by one instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceNamespaces {
    pub variables: CacheNamespace,
    pub image_paths: CacheNamespace,
    pub capabilities: CacheNamespace,
}

impl InstanceNamespaces {
    /// Namespaces for the instance served at `base_url`
    pub fn for_instance(base_url: &str) -> Self {
        Self {
            variables: CacheNamespace::variables(base_url),
            image_paths: CacheNamespace::image_paths(base_url),
            capabilities: CacheNamespace::capabilities(base_url),
        }
    }
}

/// Factory for namespace handles
pub trait DistributedCache: Send + Sync {
    /// Open a handle on a namespace
    fn create(&self, namespace: &CacheNamespace) -> Box<dyn CacheHandle>;
}

/// Handle on a single cache namespace
#[async_trait]
pub trait CacheHandle: Send + Sync {
    /// Read an entry; unreadable entries count as absent
    async fn get(&self, key: &str) -> Option<Value>;

    /// Store an entry
    async fn set(&self, key: &str, value: Value) -> ThemingResult<()>;

    /// Drop every entry in the namespace
    async fn clear(&self) -> ThemingResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_display_embeds_instance() {
        let ns = CacheNamespace::variables("https://cloud.test");
        assert_eq!(ns.to_string(), "theming-https://cloud.test");
        assert_eq!(ns.product(), "theming");
        assert_eq!(ns.instance(), "https://cloud.test");
    }

    #[test]
    fn instance_namespaces_are_distinct() {
        let a = InstanceNamespaces::for_instance("https://a.test");
        let b = InstanceNamespaces::for_instance("https://b.test");

        assert_ne!(a.variables, a.image_paths);
        assert_ne!(a.variables, a.capabilities);
        assert_ne!(a.variables, b.variables);
    }
}
