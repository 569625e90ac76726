//! Branding overrides and their derived, cached representations
//!
//! # Data Flow
//! ```text
//! set/undo ─→ SettingsMutator ─→ SettingsStore (persist)
//!                              └→ CacheBuster (version + 1, clear namespaces)
//!
//! reads ─→ OverrideResolver          override ?? default, sanitized
//!       ─→ DerivedVariableCache      cached map, recomputed after a clear
//!       ─→ ImageResolutionPolicy     cached per app/file decision
//!              └→ CapabilityProbe    cached separately, never cleared
//! ```
//!
//! Writes always persist before they invalidate. A read racing a write may
//! repopulate one stale entry; the next write clears it again.

mod attribute;
pub mod cache_buster;
mod factory;
mod images;
mod mutator;
mod probe;
mod resolver;
pub mod sanitize;
mod variables;

pub use attribute::{BrandingAttribute, Sanitization};
pub use cache_buster::{CacheBuster, CACHE_BUSTER_KEY};
pub use factory::create_theming;
pub use images::{ImageResolutionPolicy, FAVICON_FILE, MANIFEST_FILE, TOUCH_ICON_FILE};
pub use mutator::{validate_setting, SettingsMutator, KNOWN_SETTINGS};
pub use probe::{CapabilityProbe, FixedRasterizer, IconRasterizer, MagickRasterizer};
pub use resolver::{parse_imprint_url, OverrideResolver};
pub use variables::{DerivedVariableCache, DerivedVariableSet};

use crate::audit::AuditLog;
use crate::cache::{DistributedCache, InstanceNamespaces};
use crate::config::BrandingDefaults;
use crate::error::ThemingResult;
use crate::host::{AppManager, ColorUtility, ImageManager, Translator, UrlGenerator};
use crate::store::SettingsStore;
use std::sync::Arc;

/// External collaborators shared by every component
#[derive(Clone)]
pub struct ThemingServices {
    pub store: Arc<dyn SettingsStore>,
    pub cache: Arc<dyn DistributedCache>,
    pub images: Arc<dyn ImageManager>,
    pub urls: Arc<dyn UrlGenerator>,
    pub apps: Arc<dyn AppManager>,
    pub colors: Arc<dyn ColorUtility>,
    pub translator: Arc<dyn Translator>,
}

/// Theming for one instance
#[derive(Clone)]
pub struct Theming {
    resolver: OverrideResolver,
    cache_buster: CacheBuster,
    variables: DerivedVariableCache,
    images: ImageResolutionPolicy,
    probe: CapabilityProbe,
    mutator: SettingsMutator,
}

impl Theming {
    /// Wire the components for the instance served at `services.urls.base_url()`
    pub fn new(
        services: ThemingServices,
        defaults: BrandingDefaults,
        rasterizer: Arc<dyn IconRasterizer>,
    ) -> Self {
        let namespaces = InstanceNamespaces::for_instance(&services.urls.base_url());

        let resolver = OverrideResolver::new(services.clone(), Arc::new(defaults));
        let cache_buster = CacheBuster::new(
            Arc::clone(&services.store),
            Arc::clone(&services.cache),
            namespaces.clone(),
        );
        let probe = CapabilityProbe::new(
            Arc::clone(&services.cache),
            namespaces.capabilities.clone(),
            rasterizer,
        );
        let variables = DerivedVariableCache::new(
            services.clone(),
            resolver.clone(),
            namespaces.variables.clone(),
        );
        let images = ImageResolutionPolicy::new(
            services.clone(),
            probe.clone(),
            namespaces.image_paths.clone(),
        );
        let mutator = SettingsMutator::new(
            Arc::clone(&services.store),
            cache_buster.clone(),
            resolver.clone(),
        );

        Self {
            resolver,
            cache_buster,
            variables,
            images,
            probe,
            mutator,
        }
    }

    /// Record every mutation in `audit`
    pub fn with_audit(mut self, audit: AuditLog) -> Self {
        self.mutator = self.mutator.with_audit(audit);
        self
    }

    /// Attribute getters
    pub fn resolver(&self) -> &OverrideResolver {
        &self.resolver
    }

    pub fn cache_buster(&self) -> &CacheBuster {
        &self.cache_buster
    }

    /// Resolve one attribute (override or default, sanitized)
    pub async fn resolve(&self, attribute: BrandingAttribute) -> String {
        self.resolver.resolve(attribute).await
    }

    /// Derived theme variables
    pub async fn scss_variables(&self) -> DerivedVariableSet {
        self.variables.get().await
    }

    /// Themed replacement for an app image, `None` to serve the default
    pub async fn replace_image_path(&self, app: &str, image: &str) -> Option<String> {
        self.images.replace_image_path(app, image).await
    }

    /// Whether icons can be rendered from the vector sources
    pub async fn should_replace_icons(&self) -> bool {
        self.probe.should_replace_icons().await
    }

    /// Store an override; returns the new cache-buster version
    pub async fn set(&self, key: &str, value: &str) -> ThemingResult<u64> {
        self.mutator.set(key, value).await
    }

    /// Revert an override; returns the value now in effect
    pub async fn undo(&self, key: &str) -> ThemingResult<String> {
        self.mutator.undo(key).await
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[tokio::test]
    async fn unset_attributes_resolve_to_defaults() {
        let fx = fixture(false);
        let defaults = acme_defaults();

        for attribute in BrandingAttribute::ALL {
            assert_eq!(
                fx.theming.resolve(attribute).await,
                attribute.default_value(&defaults),
                "attribute {}",
                attribute
            );
        }
    }

    #[tokio::test]
    async fn set_then_undo_restores_default() {
        let fx = fixture(false);
        let defaults = acme_defaults();

        for attribute in BrandingAttribute::ALL {
            fx.theming
                .set(attribute.setting_key(), "Override")
                .await
                .unwrap();
            assert_eq!(fx.theming.resolve(attribute).await, "Override");

            fx.theming.undo(attribute.setting_key()).await.unwrap();
            assert_eq!(
                fx.theming.resolve(attribute).await,
                attribute.default_value(&defaults)
            );
        }
    }

    #[tokio::test]
    async fn cache_buster_strictly_increases_on_every_write() {
        let fx = fixture(false);
        let mut last = fx.theming.cache_buster().current().await;

        for step in 0..5 {
            if step % 2 == 0 {
                fx.theming.set("slogan", "x").await.unwrap();
            } else {
                fx.theming.undo("slogan").await.unwrap();
            }
            let now = fx.theming.cache_buster().current().await;
            assert!(now > last);
            last = now;
        }
    }

    #[tokio::test]
    async fn write_is_visible_on_next_variable_read() {
        let fx = fixture(false);

        let before = fx.theming.scss_variables().await;
        assert!(before.get("color-primary").is_none());

        fx.theming.set("color", "#112233").await.unwrap();
        let after = fx.theming.scss_variables().await;

        assert_eq!(after.get("color-primary"), Some("#112233"));
        assert_eq!(after.get("color-primary-text"), Some("#ffffff"));
        assert_eq!(after.get("theming-cachebuster"), Some("'1'"));
    }

    #[tokio::test]
    async fn instances_do_not_share_cached_variables() {
        let fx = fixture(false);
        fx.theming.set("color", "#112233").await.unwrap();
        fx.theming.scss_variables().await;

        // A second instance on the same cache and store, different base URL
        let other_ns = InstanceNamespaces::for_instance("https://other.test");
        assert!(fx.cache.is_empty(&other_ns.variables));
        assert_eq!(fx.cache.len(&fx.namespaces.variables), 1);
    }
}
