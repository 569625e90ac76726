//! Derived theme variables, cached as one unit per instance
//!
//! The set is recomputed on the first read after its namespace was cleared
//! and served from the cache until the next clear. There is no TTL.

use crate::cache::CacheNamespace;
use crate::host::{LogoImageKind, BACKGROUND_COLOR_MIME};
use crate::store::THEMING_NAMESPACE;
use crate::theming::attribute::BrandingAttribute;
use crate::theming::cache_buster::current_version;
use crate::theming::resolver::OverrideResolver;
use crate::theming::ThemingServices;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Cache key of the derived set within the variables namespace
const VARIABLES_KEY: &str = "getScssVariables";

/// Variable name to SCSS value, in name order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DerivedVariableSet(BTreeMap<String, String>);

impl DerivedVariableSet {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as SCSS variable declarations
    pub fn to_scss(&self) -> String {
        self.iter()
            .map(|(name, value)| format!("${}: {};\n", name, value))
            .collect()
    }

    fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_string(), value.into());
    }
}

/// SCSS string literal
fn quoted(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Write-invalidated cache of the derived variable set
#[derive(Clone)]
pub struct DerivedVariableCache {
    services: ThemingServices,
    resolver: OverrideResolver,
    namespace: CacheNamespace,
}

impl DerivedVariableCache {
    pub fn new(
        services: ThemingServices,
        resolver: OverrideResolver,
        namespace: CacheNamespace,
    ) -> Self {
        Self {
            services,
            resolver,
            namespace,
        }
    }

    /// Cached set, recomputed and stored on a miss
    pub async fn get(&self) -> DerivedVariableSet {
        let handle = self.services.cache.create(&self.namespace);

        if let Some(value) = handle.get(VARIABLES_KEY).await {
            match serde_json::from_value::<DerivedVariableSet>(value) {
                Ok(set) => {
                    debug!("Variable set served from {}", self.namespace);
                    return set;
                }
                Err(e) => debug!("Discarding malformed cached variable set: {}", e),
            }
        }

        let set = self.compute().await;
        debug!("Computed {} theme variables", set.len());

        match serde_json::to_value(&set) {
            Ok(value) => {
                if let Err(e) = handle.set(VARIABLES_KEY, value).await {
                    warn!("Failed to cache theme variables: {}", e);
                }
            }
            Err(e) => warn!("Failed to serialize theme variables: {}", e),
        }

        set
    }

    async fn compute(&self) -> DerivedVariableSet {
        let store = self.services.store.as_ref();
        let images = self.services.images.as_ref();
        let mut set = DerivedVariableSet::default();

        let version = current_version(store).await;
        set.insert("theming-cachebuster", quoted(&version.to_string()));

        for kind in LogoImageKind::ALL {
            let mime = store
                .get_value_or(THEMING_NAMESPACE, kind.mime_setting(), "")
                .await;
            set.insert(&format!("theming-{}-mime", kind.key()), quoted(&mime));
        }

        for (name, kind) in [
            ("image-logo", LogoImageKind::Logo),
            ("image-logoheader", LogoImageKind::LogoHeader),
            ("image-favicon", LogoImageKind::Favicon),
            ("image-login-background", LogoImageKind::Background),
        ] {
            set.insert(name, quoted(&images.get_image_url(kind).await));
        }

        let background_mime = store
            .get_value(THEMING_NAMESPACE, LogoImageKind::Background.mime_setting())
            .await;
        let plain = background_mime.as_deref() == Some(BACKGROUND_COLOR_MIME);
        set.insert("image-login-plain", plain.to_string());

        // Unthemed instances keep the stylesheet's own color defaults
        if self.resolver.is_overridden(BrandingAttribute::ColorPrimary).await {
            set.insert("color-primary", self.resolver.color_primary().await);
            set.insert("color-primary-text", self.resolver.text_color_primary().await);
            set.insert(
                "color-primary-element",
                self.resolver.element_color_primary().await,
            );
        }

        set
    }
}
