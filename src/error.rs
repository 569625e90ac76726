//! Error types for theming
//!
//! All modules use `ThemingResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for theming operations
pub type ThemingResult<T> = Result<T, ThemingError>;

/// All errors that can occur in theming
#[derive(Error, Debug)]
pub enum ThemingError {
    // Lookup errors (recovered locally by the resolvers)
    #[error("Image not found: {0}")]
    NotFound(String),

    #[error("App path not found: {0}")]
    AppPathNotFound(String),

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    // Settings errors
    #[error("Invalid value for setting {key}: {reason}")]
    InvalidSetting { key: String, reason: String },

    #[error("Unknown branding attribute: {0}")]
    UnknownAttribute(String),

    #[error("Failed to persist setting {key}: {reason}")]
    SettingsPersist { key: String, reason: String },

    #[error("Stored cache buster '{0}' is not a version number")]
    CorruptVersion(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

impl ThemingError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create an invalid setting error
    pub fn invalid_setting(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error only means "fall back to the default"
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::AppPathNotFound(_))
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::UnknownAttribute(_) => Some("Run: theming show  (lists all attributes)"),
            Self::InvalidSetting { .. } => Some("Colors use #rgb or #rrggbb notation"),
            Self::ConfigInvalid { .. } => Some("Run: theming config init --force"),
            Self::ConfigNotFound(_) => Some("Run: theming config init"),
            Self::SettingsPersist { .. } => Some("Check that the storage directory is writable"),
            Self::CorruptVersion(_) => Some("Restore the cachebuster entry in settings.json"),
            _ => None,
        }
    }
}
