//! Host-provided collaborators
//!
//! The theming core only talks to images, URLs, apps, colors and
//! translations through these narrow interfaces:
//! - [`ImageManager`]: uploaded logo/header/background/favicon images
//! - [`UrlGenerator`]: route and static image URLs
//! - [`AppManager`]: installed app locations
//! - [`ColorUtility`]: contrast and element color derivation
//! - [`Translator`]: user-facing strings

mod apps;
mod color;
mod images;
mod urls;

pub use apps::FsAppManager;
pub use color::LuminanceColorUtility;
pub use images::{FsImageManager, BACKGROUND_COLOR_MIME};
pub use urls::RouteUrlGenerator;

use crate::error::ThemingResult;
use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;

/// Kinds of custom images an administrator can upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogoImageKind {
    Logo,
    LogoHeader,
    Background,
    Favicon,
}

impl LogoImageKind {
    /// All kinds, in derived-variable order
    pub const ALL: [LogoImageKind; 4] = [
        LogoImageKind::Logo,
        LogoImageKind::LogoHeader,
        LogoImageKind::Background,
        LogoImageKind::Favicon,
    ];

    /// Storage and route key
    pub fn key(&self) -> &'static str {
        match self {
            Self::Logo => "logo",
            Self::LogoHeader => "logoheader",
            Self::Background => "background",
            Self::Favicon => "favicon",
        }
    }

    /// Setting key holding the MIME marker of the upload
    pub fn mime_setting(&self) -> &'static str {
        match self {
            Self::Logo => "logoMime",
            Self::LogoHeader => "logoheaderMime",
            Self::Background => "backgroundMime",
            Self::Favicon => "faviconMime",
        }
    }

    /// Parse from the storage key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl fmt::Display for LogoImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A custom image that exists in image storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle {
    pub kind: LogoImageKind,
    pub path: PathBuf,
    pub mime: Option<String>,
}

/// Named routes served by the HTTP layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// A custom uploaded image
    Image { key: String },
    /// Themed favicon for an app
    Favicon { app: String },
    /// Themed touch icon for an app
    TouchIcon { app: String },
    /// Themed web app manifest
    Manifest,
}

impl Route {
    /// Route name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Image { .. } => "theming.image",
            Self::Favicon { .. } => "theming.favicon",
            Self::TouchIcon { .. } => "theming.touch_icon",
            Self::Manifest => "theming.manifest",
        }
    }
}

/// Uploaded image storage
#[async_trait]
pub trait ImageManager: Send + Sync {
    /// Fetch a custom image; fails with `NotFound` when none was uploaded
    async fn get_image(&self, kind: LogoImageKind) -> ThemingResult<ImageHandle>;

    /// URL of the image in effect (custom upload or built-in fallback)
    async fn get_image_url(&self, kind: LogoImageKind) -> String;
}

/// URL generation
pub trait UrlGenerator: Send + Sync {
    /// Absolute-path link to a route
    fn link_to_route(&self, route: &Route) -> String;

    /// Absolute-path link to a static image shipped by an app
    fn image_path(&self, app: &str, file: &str) -> String;

    /// Public URL of the instance
    fn base_url(&self) -> String;
}

/// Installed app lookup
#[async_trait]
pub trait AppManager: Send + Sync {
    /// Directory of an installed app; fails with `AppPathNotFound`
    async fn get_app_path(&self, app_id: &str) -> ThemingResult<PathBuf>;
}

/// Color derivations
pub trait ColorUtility: Send + Sync {
    /// `#000000` or `#ffffff`, whichever reads better on `color`
    fn contrasting_text_color(&self, color: &str) -> String;

    /// Color used for primary elements drawn on a light background
    fn element_color(&self, color: &str) -> String;
}

/// Localized strings
pub trait Translator: Send + Sync {
    fn translate(&self, text: &str) -> String;
}

/// Translator returning the source strings unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Untranslated;

impl Translator for Untranslated {
    fn translate(&self, text: &str) -> String {
        text.to_string()
    }
}
