//! Uploaded images on the local filesystem
//!
//! An upload of kind `k` is the file `<images_dir>/<k>`; its MIME marker is
//! the `<k>Mime` setting written alongside it.

use crate::error::{ThemingError, ThemingResult};
use crate::host::{ImageHandle, ImageManager, LogoImageKind, Route, UrlGenerator};
use crate::store::{SettingsStore, THEMING_NAMESPACE};
use crate::theming::cache_buster::{current_version, versioned};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;

/// MIME marker meaning "solid color background, no image"
pub const BACKGROUND_COLOR_MIME: &str = "backgroundColor";

/// Image manager over a directory of uploads
pub struct FsImageManager {
    dir: PathBuf,
    store: Arc<dyn SettingsStore>,
    urls: Arc<dyn UrlGenerator>,
}

impl FsImageManager {
    /// Create a manager for uploads in `dir`
    pub fn new(
        dir: impl Into<PathBuf>,
        store: Arc<dyn SettingsStore>,
        urls: Arc<dyn UrlGenerator>,
    ) -> Self {
        Self {
            dir: dir.into(),
            store,
            urls,
        }
    }

    /// Built-in image used when no upload exists
    fn fallback_file(kind: LogoImageKind) -> &'static str {
        match kind {
            LogoImageKind::Logo | LogoImageKind::LogoHeader | LogoImageKind::Favicon => "logo.png",
            LogoImageKind::Background => "background.png",
        }
    }
}

#[async_trait]
impl ImageManager for FsImageManager {
    async fn get_image(&self, kind: LogoImageKind) -> ThemingResult<ImageHandle> {
        let mime = self
            .store
            .get_value(THEMING_NAMESPACE, kind.mime_setting())
            .await;

        if kind == LogoImageKind::Background && mime.as_deref() == Some(BACKGROUND_COLOR_MIME) {
            return Err(ThemingError::NotFound(kind.to_string()));
        }

        let path = self.dir.join(kind.key());
        let is_file = fs::metadata(&path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);

        if !is_file {
            return Err(ThemingError::NotFound(kind.to_string()));
        }

        Ok(ImageHandle { kind, path, mime })
    }

    async fn get_image_url(&self, kind: LogoImageKind) -> String {
        let version = current_version(self.store.as_ref()).await;

        let base = match self.get_image(kind).await {
            Ok(_) => self.urls.link_to_route(&Route::Image {
                key: kind.key().to_string(),
            }),
            Err(_) => self.urls.image_path("core", Self::fallback_file(kind)),
        };

        versioned(&base, version)
    }
}
