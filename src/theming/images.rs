//! Image replacement decisions for app asset requests

use crate::cache::CacheNamespace;
use crate::error::ThemingError;
use crate::host::{LogoImageKind, Route};
use crate::theming::cache_buster::{current_version, versioned};
use crate::theming::probe::CapabilityProbe;
use crate::theming::ThemingServices;
use serde_json::Value;
use tracing::{debug, warn};

pub const FAVICON_FILE: &str = "favicon.ico";
pub const TOUCH_ICON_FILE: &str = "favicon-touch.png";
pub const MANIFEST_FILE: &str = "manifest.json";

/// Decides whether an app image request is served from a themed route
#[derive(Clone)]
pub struct ImageResolutionPolicy {
    services: ThemingServices,
    probe: CapabilityProbe,
    namespace: CacheNamespace,
}

impl ImageResolutionPolicy {
    pub fn new(
        services: ThemingServices,
        probe: CapabilityProbe,
        namespace: CacheNamespace,
    ) -> Self {
        Self {
            services,
            probe,
            namespace,
        }
    }

    /// Themed URL for `image` requested by `app`, or `None` to serve the
    /// default asset unchanged
    pub async fn replace_image_path(&self, app: &str, image: &str) -> Option<String> {
        let app = if app.is_empty() { "core" } else { app };

        if !matches!(image, FAVICON_FILE | TOUCH_ICON_FILE | MANIFEST_FILE) {
            return None;
        }

        let handle = self.services.cache.create(&self.namespace);
        let key = format!("{}/{}", app, image);

        match handle.get(&key).await {
            Some(Value::String(url)) => return Some(url),
            Some(Value::Null) => return None,
            Some(other) => debug!("Discarding malformed image decision for {}: {}", key, other),
            None => {}
        }

        let decision = self.decide(app, image).await;
        let value = decision.clone().map_or(Value::Null, Value::String);
        if let Err(e) = handle.set(&key, value).await {
            warn!("Failed to cache image decision for {}: {}", key, e);
        }

        decision
    }

    async fn decide(&self, app: &str, image: &str) -> Option<String> {
        let route = match image {
            FAVICON_FILE | TOUCH_ICON_FILE => {
                if !self.icons_replaceable().await {
                    return None;
                }
                if image == FAVICON_FILE {
                    Route::Favicon {
                        app: app.to_string(),
                    }
                } else {
                    Route::TouchIcon {
                        app: app.to_string(),
                    }
                }
            }
            MANIFEST_FILE => {
                if self.ships_own_manifest(app).await {
                    return None;
                }
                Route::Manifest
            }
            _ => return None,
        };

        let version = current_version(self.services.store.as_ref()).await;
        let url = versioned(&self.services.urls.link_to_route(&route), version);
        debug!("Replacing {}/{} with {} ({})", app, image, url, route.name());
        Some(url)
    }

    async fn icons_replaceable(&self) -> bool {
        match self.services.images.get_image(LogoImageKind::Favicon).await {
            Ok(_) => true,
            Err(e) => {
                debug!("No custom favicon: {}", e);
                self.probe.should_replace_icons().await
            }
        }
    }

    async fn ships_own_manifest(&self, app: &str) -> bool {
        match self.services.apps.get_app_path(app).await {
            Ok(path) => tokio::fs::metadata(path.join("img").join(MANIFEST_FILE))
                .await
                .map(|m| m.is_file())
                .unwrap_or(false),
            Err(ThemingError::AppPathNotFound(_)) => false,
            Err(e) => {
                warn!("App lookup for {} failed: {}", app, e);
                false
            }
        }
    }
}
