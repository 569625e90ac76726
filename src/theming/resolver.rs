//! Override resolution: stored override, else built-in default

use crate::config::BrandingDefaults;
use crate::error::{ThemingError, ThemingResult};
use crate::host::{LogoImageKind, Route};
use crate::store::THEMING_NAMESPACE;
use crate::theming::attribute::{BrandingAttribute, Sanitization};
use crate::theming::cache_buster::{current_version, versioned};
use crate::theming::sanitize::{escape_html, strip_tags};
use crate::theming::ThemingServices;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Resolves branding attributes against the stored overrides
#[derive(Clone)]
pub struct OverrideResolver {
    services: ThemingServices,
    defaults: Arc<BrandingDefaults>,
}

impl OverrideResolver {
    pub fn new(services: ThemingServices, defaults: Arc<BrandingDefaults>) -> Self {
        Self { services, defaults }
    }

    /// Built-in defaults this resolver falls back to
    pub fn defaults(&self) -> &BrandingDefaults {
        &self.defaults
    }

    /// Override or default, without sanitization
    pub async fn raw(&self, attribute: BrandingAttribute) -> String {
        self.services
            .store
            .get_value_or(
                THEMING_NAMESPACE,
                attribute.setting_key(),
                attribute.default_value(&self.defaults),
            )
            .await
    }

    /// Whether an override is stored for the attribute
    pub async fn is_overridden(&self, attribute: BrandingAttribute) -> bool {
        self.services
            .store
            .get_value(THEMING_NAMESPACE, attribute.setting_key())
            .await
            .is_some()
    }

    /// Override or default, sanitized for output
    pub async fn resolve(&self, attribute: BrandingAttribute) -> String {
        let value = self.raw(attribute).await;
        match attribute.sanitization() {
            Sanitization::StripTags => strip_tags(&value),
            Sanitization::EscapeHtml => escape_html(&value),
            Sanitization::None => value,
        }
    }

    pub async fn name(&self) -> String {
        self.resolve(BrandingAttribute::Name).await
    }

    /// Name with its markup intact
    pub async fn html_name(&self) -> String {
        self.raw(BrandingAttribute::Name).await
    }

    pub async fn title(&self) -> String {
        self.resolve(BrandingAttribute::Title).await
    }

    pub async fn entity(&self) -> String {
        self.resolve(BrandingAttribute::Entity).await
    }

    pub async fn base_url(&self) -> String {
        self.resolve(BrandingAttribute::BaseUrl).await
    }

    pub async fn slogan(&self) -> String {
        self.resolve(BrandingAttribute::Slogan).await
    }

    pub async fn imprint_url(&self) -> String {
        self.resolve(BrandingAttribute::ImprintUrl).await
    }

    /// Color used for the header and mail headers
    pub async fn color_primary(&self) -> String {
        self.resolve(BrandingAttribute::ColorPrimary).await
    }

    /// Text color drawn on the primary color
    pub async fn text_color_primary(&self) -> String {
        let color = self.color_primary().await;
        self.services.colors.contrasting_text_color(&color)
    }

    /// Primary color adjusted for elements on a light background
    pub async fn element_color_primary(&self) -> String {
        let color = self.color_primary().await;
        self.services.colors.element_color(&color)
    }

    pub async fn itunes_app_id(&self) -> String {
        self.resolve(BrandingAttribute::ITunesAppId).await
    }

    pub async fn ios_client_url(&self) -> String {
        self.resolve(BrandingAttribute::IosClientUrl).await
    }

    pub async fn android_client_url(&self) -> String {
        self.resolve(BrandingAttribute::AndroidClientUrl).await
    }

    /// Entity linked to the base URL, then the slogan and a legal notice
    /// link when the imprint URL is valid
    pub async fn short_footer(&self) -> String {
        let slogan = self.slogan().await;
        let mut footer = format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noreferrer noopener\">{}</a>",
            self.base_url().await,
            self.entity().await
        );

        if !slogan.is_empty() {
            footer.push_str(" – ");
            footer.push_str(&slogan);
        }

        let imprint = self.imprint_url().await;
        if imprint.is_empty() {
            return footer;
        }

        match parse_imprint_url(&imprint) {
            Ok(_) => {
                footer.push_str(&format!(
                    "<br/><a href=\"{}\" class=\"legal\" target=\"_blank\" rel=\"noreferrer noopener\">{}</a>",
                    imprint,
                    self.services.translator.translate("Legal notice")
                ));
            }
            Err(e) => debug!("Omitting legal notice link: {}", e),
        }

        footer
    }

    /// Themed logo URL, falling back to the core logo
    pub async fn logo(&self, use_svg: bool) -> String {
        let version = current_version(self.services.store.as_ref()).await;

        let has_mime = self
            .services
            .store
            .get_value(THEMING_NAMESPACE, LogoImageKind::Logo.mime_setting())
            .await
            .is_some_and(|mime| !mime.is_empty());

        let exists = match self.services.images.get_image(LogoImageKind::Logo).await {
            Ok(_) => true,
            Err(e) => {
                debug!("No custom logo: {}", e);
                false
            }
        };

        let url = if has_mime && exists {
            self.services.urls.link_to_route(&Route::Image {
                key: LogoImageKind::Logo.key().to_string(),
            })
        } else if use_svg {
            self.services.urls.image_path("core", "logo.svg")
        } else {
            self.services.urls.image_path("core", "logo.png")
        };

        versioned(&url, version)
    }

    /// Background image URL in effect
    pub async fn background(&self) -> String {
        self.services
            .images
            .get_image_url(LogoImageKind::Background)
            .await
    }
}

/// Validate an imprint URL: it must carry both a scheme and a host
pub fn parse_imprint_url(raw: &str) -> ThemingResult<Url> {
    let invalid = |reason: String| ThemingError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !url.has_host() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}
