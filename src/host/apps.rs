//! Installed app lookup on the filesystem

use crate::error::{ThemingError, ThemingResult};
use crate::host::AppManager;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

/// Finds apps as directories under a list of app roots
#[derive(Debug, Clone, Default)]
pub struct FsAppManager {
    roots: Vec<PathBuf>,
}

impl FsAppManager {
    /// Search `roots` in order
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }
}

#[async_trait]
impl AppManager for FsAppManager {
    async fn get_app_path(&self, app_id: &str) -> ThemingResult<PathBuf> {
        // App ids are single path components
        if app_id.is_empty() || app_id.contains(['/', '\\', '\0']) || app_id == ".." {
            return Err(ThemingError::AppPathNotFound(app_id.to_string()));
        }

        for root in &self.roots {
            let candidate = root.join(app_id);
            if fs::metadata(&candidate)
                .await
                .map(|m| m.is_dir())
                .unwrap_or(false)
            {
                return Ok(candidate);
            }
        }

        Err(ThemingError::AppPathNotFound(app_id.to_string()))
    }
}
