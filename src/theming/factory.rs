//! Builds a [`Theming`] wired to the production collaborators
//!
//! Settings, cache entries, uploads and the audit log all live under the
//! configured state directory.

use crate::audit::AuditLog;
use crate::cache::FileCache;
use crate::config::Config;
use crate::error::ThemingResult;
use crate::host::{
    FsAppManager, FsImageManager, LuminanceColorUtility, RouteUrlGenerator, Untranslated,
    UrlGenerator,
};
use crate::store::{FileSettingsStore, SettingsStore};
use crate::theming::probe::{FixedRasterizer, IconRasterizer, MagickRasterizer};
use crate::theming::{Theming, ThemingServices};
use std::sync::Arc;
use tracing::debug;

/// Create the theming facade described by `config`
///
/// # Returns
/// * `Ok(Theming)` - Ready to serve reads and writes
/// * `Err` - If the settings document exists but cannot be read
pub async fn create_theming(config: &Config) -> ThemingResult<Theming> {
    let store: Arc<dyn SettingsStore> =
        Arc::new(FileSettingsStore::open(config.settings_path()).await?);
    let urls: Arc<dyn UrlGenerator> = Arc::new(RouteUrlGenerator::new(&config.instance.base_url));

    let services = ThemingServices {
        store: Arc::clone(&store),
        cache: Arc::new(FileCache::new(config.cache_dir())),
        images: Arc::new(FsImageManager::new(
            config.images_dir(),
            Arc::clone(&store),
            Arc::clone(&urls),
        )),
        urls,
        apps: Arc::new(FsAppManager::new(config.storage.apps_dirs.clone())),
        colors: Arc::new(LuminanceColorUtility),
        translator: Arc::new(Untranslated),
    };

    debug!(
        "Theming for {} with state in {}",
        config.instance.base_url,
        config.state_dir().display()
    );

    Ok(Theming::new(services, config.defaults.clone(), create_rasterizer(config))
        .with_audit(AuditLog::new(config)))
}

/// Rasterizer selected by the `[icons]` section
fn create_rasterizer(config: &Config) -> Arc<dyn IconRasterizer> {
    if config.icons.probe {
        Arc::new(MagickRasterizer::new(config.icons.magick_binary.clone()))
    } else {
        Arc::new(FixedRasterizer(false))
    }
}
