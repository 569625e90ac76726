//! Environment capability probe for vector icon rasterization
//!
//! The result depends on the host, not on settings, so it lives in its own
//! namespace that the cache buster never clears.

use crate::cache::{CacheNamespace, DistributedCache};
use crate::error::{ThemingError, ThemingResult};
use async_trait::async_trait;
use serde_json::Value;
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Cache key of the probe result
const PROBE_KEY: &str = "shouldReplaceIcons";

/// Vector-to-raster icon conversion capability
#[async_trait]
pub trait IconRasterizer: Send + Sync {
    /// Whether a rasterizer is installed
    async fn is_available(&self) -> bool;

    /// Whether it can read `format` (e.g. `SVG`)
    async fn supports_format(&self, format: &str) -> bool;
}

/// Rasterizer with a pinned answer
#[derive(Debug, Clone, Copy)]
pub struct FixedRasterizer(pub bool);

#[async_trait]
impl IconRasterizer for FixedRasterizer {
    async fn is_available(&self) -> bool {
        self.0
    }

    async fn supports_format(&self, _format: &str) -> bool {
        self.0
    }
}

/// ImageMagick found on the `PATH`
pub struct MagickRasterizer {
    candidates: Vec<String>,
    binary: OnceCell<Option<String>>,
}

impl MagickRasterizer {
    /// Probe `binary` if given, else `magick` then `convert`
    pub fn new(binary: Option<String>) -> Self {
        let candidates = match binary {
            Some(binary) => vec![binary],
            None => vec!["magick".to_string(), "convert".to_string()],
        };
        Self {
            candidates,
            binary: OnceCell::new(),
        }
    }

    /// First candidate that runs, resolved once
    async fn binary(&self) -> Option<&str> {
        self.binary
            .get_or_init(|| async {
                for candidate in &self.candidates {
                    if Self::runs(candidate).await {
                        debug!("Using ImageMagick binary {}", candidate);
                        return Some(candidate.clone());
                    }
                }
                debug!("No ImageMagick binary found in {:?}", self.candidates);
                None
            })
            .await
            .as_deref()
    }

    async fn runs(binary: &str) -> bool {
        Command::new(binary)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    async fn list_formats(binary: &str) -> ThemingResult<String> {
        let output = Command::new(binary)
            .args(["-list", "format"])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| ThemingError::command_failed(format!("{} -list format", binary), e))?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl IconRasterizer for MagickRasterizer {
    async fn is_available(&self) -> bool {
        self.binary().await.is_some()
    }

    async fn supports_format(&self, format: &str) -> bool {
        let Some(binary) = self.binary().await else {
            return false;
        };

        match Self::list_formats(binary).await {
            Ok(listing) => format_readable(&listing, format),
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }
}

/// Whether a `-list format` listing reports `format` with read support
///
/// Rows look like `SVG  SVG  rw+  Scalable Vector Graphics`; a trailing `*`
/// on the name marks a native blob format.
fn format_readable(listing: &str, format: &str) -> bool {
    listing.lines().any(|line| {
        let mut tokens = line.split_whitespace();
        let (Some(name), Some(_module), Some(mode)) = (tokens.next(), tokens.next(), tokens.next())
        else {
            return false;
        };
        name.trim_end_matches('*').eq_ignore_ascii_case(format) && mode.contains('r')
    })
}

/// Cached answer to "can icons be rendered from the vector sources"
#[derive(Clone)]
pub struct CapabilityProbe {
    cache: Arc<dyn DistributedCache>,
    namespace: CacheNamespace,
    rasterizer: Arc<dyn IconRasterizer>,
}

impl CapabilityProbe {
    pub fn new(
        cache: Arc<dyn DistributedCache>,
        namespace: CacheNamespace,
        rasterizer: Arc<dyn IconRasterizer>,
    ) -> Self {
        Self {
            cache,
            namespace,
            rasterizer,
        }
    }

    pub async fn should_replace_icons(&self) -> bool {
        let handle = self.cache.create(&self.namespace);

        match handle.get(PROBE_KEY).await {
            Some(Value::Bool(cached)) => return cached,
            Some(other) => debug!("Discarding malformed probe result: {}", other),
            None => {}
        }

        let supported =
            self.rasterizer.is_available().await && self.rasterizer.supports_format("SVG").await;
        info!("Icon rasterization supported: {}", supported);

        if let Err(e) = handle.set(PROBE_KEY, Value::Bool(supported)).await {
            warn!("Failed to cache probe result: {}", e);
        }
        supported
    }
}
