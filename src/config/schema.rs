//! Configuration schema for theming
//!
//! Configuration is stored at `~/.config/theming/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// The serving instance
    pub instance: InstanceConfig,

    /// Built-in branding values used when no override is stored
    pub defaults: BrandingDefaults,

    /// Where settings, cache entries and images live
    pub storage: StorageConfig,

    /// Icon rasterization settings
    pub icons: IconsConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,

    /// Enable audit logging of settings changes
    pub audit_log: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
            audit_log: true,
        }
    }
}

/// Serving instance settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceConfig {
    /// Public URL of this instance. Its path is the web root for generated
    /// links and the whole URL scopes the cache namespaces.
    pub base_url: String,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost".to_string(),
        }
    }
}

/// Built-in branding defaults
///
/// Captured once when the instance starts and never mutated afterwards;
/// stored overrides are layered on top by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandingDefaults {
    pub name: String,
    pub title: String,
    pub entity: String,
    pub base_url: String,
    pub slogan: String,
    /// Primary color as `#rrggbb`
    pub color: String,
    pub imprint_url: String,
    pub itunes_app_id: String,
    pub ios_client_url: String,
    pub android_client_url: String,
}

impl Default for BrandingDefaults {
    fn default() -> Self {
        Self {
            name: "Cloud".to_string(),
            title: "Cloud".to_string(),
            entity: "Cloud".to_string(),
            base_url: "https://cloud.example".to_string(),
            slogan: "a safe home for all your data".to_string(),
            color: "#0082c9".to_string(),
            imprint_url: String::new(),
            itunes_app_id: String::new(),
            ios_client_url: String::new(),
            android_client_url: String::new(),
        }
    }
}

/// Storage locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// State directory (defaults to the platform state dir)
    pub dir: Option<PathBuf>,

    /// Directories searched for installed apps
    pub apps_dirs: Vec<PathBuf>,
}

/// Icon rasterization settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IconsConfig {
    /// Probe the environment for SVG rasterization (false = never replace icons)
    pub probe: bool,

    /// Explicit ImageMagick binary (auto-detected when unset)
    pub magick_binary: Option<String>,
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            probe: true,
            magick_binary: None,
        }
    }
}
