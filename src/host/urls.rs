//! Route URL generation under the instance web root

use crate::host::{Route, UrlGenerator};
use url::Url;

/// Generates links relative to the web root of the instance base URL
#[derive(Debug, Clone)]
pub struct RouteUrlGenerator {
    base_url: String,
    web_root: String,
}

impl RouteUrlGenerator {
    /// Create a generator for the instance served at `base_url`
    ///
    /// A base URL without a parseable path is served from `/`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let web_root = Url::parse(&base_url)
            .map(|url| url.path().trim_end_matches('/').to_string())
            .unwrap_or_default();

        Self { base_url, web_root }
    }

    /// Path prefix of every generated link (empty for `/`)
    pub fn web_root(&self) -> &str {
        &self.web_root
    }
}

impl UrlGenerator for RouteUrlGenerator {
    fn link_to_route(&self, route: &Route) -> String {
        let path = match route {
            Route::Image { key } => format!("/apps/theming/image/{}", key),
            Route::Favicon { app } => format!("/apps/theming/favicon/{}", app),
            Route::TouchIcon { app } => format!("/apps/theming/icon/{}", app),
            Route::Manifest => "/apps/theming/manifest".to_string(),
        };
        format!("{}{}", self.web_root, path)
    }

    fn image_path(&self, app: &str, file: &str) -> String {
        match app {
            "" | "core" => format!("{}/core/img/{}", self.web_root, file),
            _ => format!("{}/apps/{}/img/{}", self.web_root, app, file),
        }
    }

    fn base_url(&self) -> String {
        self.base_url.clone()
    }
}
