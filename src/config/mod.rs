//! Configuration management for theming

pub mod schema;

pub use schema::{BrandingDefaults, Config};

use crate::error::{ThemingError, ThemingResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};
use url::Url;

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("theming")
            .join("config.toml")
    }

    /// Get the default state directory path
    pub fn state_dir() -> PathBuf {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("theming")
    }

    /// Load configuration, using defaults if the file does not exist
    pub async fn load(&self) -> ThemingResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> ThemingResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| ThemingError::io(format!("reading config from {}", path.display()), e))?;

        let config: Config = toml::from_str(&content).map_err(|e| ThemingError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        validate(&config).map_err(|reason| ThemingError::ConfigInvalid {
            path: path.to_path_buf(),
            reason,
        })?;

        Ok(config)
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> ThemingResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            ThemingError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> ThemingResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ThemingError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// State directory for this configuration
    pub fn state_dir(&self) -> PathBuf {
        self.storage
            .dir
            .clone()
            .unwrap_or_else(ConfigManager::state_dir)
    }

    /// Path of the persisted settings document
    pub fn settings_path(&self) -> PathBuf {
        self.state_dir().join("settings.json")
    }

    /// Root of the file-backed distributed cache
    pub fn cache_dir(&self) -> PathBuf {
        self.state_dir().join("cache")
    }

    /// Directory holding uploaded images
    pub fn images_dir(&self) -> PathBuf {
        self.state_dir().join("images")
    }

    /// Audit log path
    pub fn audit_log_path(&self) -> PathBuf {
        self.state_dir().join("audit.log")
    }
}

/// Semantic checks that serde cannot express
pub fn validate(config: &Config) -> Result<(), String> {
    let url = Url::parse(&config.instance.base_url)
        .map_err(|e| format!("instance.base_url: {}", e))?;
    if !url.has_host() {
        return Err("instance.base_url: missing host".to_string());
    }

    match config.general.log_format.as_str() {
        "text" | "json" => {}
        other => return Err(format!("general.log_format: unknown format '{}'", other)),
    }

    Ok(())
}
