//! Branding attributes and their storage keys

use crate::config::BrandingDefaults;
use crate::error::ThemingError;
use std::fmt;
use std::str::FromStr;

/// How a resolved value is cleaned before output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sanitization {
    /// Remove all markup
    StripTags,
    /// Escape markup outside a small allow-list
    EscapeHtml,
    /// Trusted administrator input, passed through
    None,
}

/// A branding value that can be overridden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrandingAttribute {
    Name,
    Title,
    Entity,
    BaseUrl,
    Slogan,
    ColorPrimary,
    ImprintUrl,
    ITunesAppId,
    IosClientUrl,
    AndroidClientUrl,
}

impl BrandingAttribute {
    pub const ALL: [BrandingAttribute; 10] = [
        Self::Name,
        Self::Title,
        Self::Entity,
        Self::BaseUrl,
        Self::Slogan,
        Self::ColorPrimary,
        Self::ImprintUrl,
        Self::ITunesAppId,
        Self::IosClientUrl,
        Self::AndroidClientUrl,
    ];

    /// Display name used by the CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Title => "title",
            Self::Entity => "entity",
            Self::BaseUrl => "base_url",
            Self::Slogan => "slogan",
            Self::ColorPrimary => "color",
            Self::ImprintUrl => "imprint_url",
            Self::ITunesAppId => "itunes_app_id",
            Self::IosClientUrl => "ios_client_url",
            Self::AndroidClientUrl => "android_client_url",
        }
    }

    /// Key of the stored override
    ///
    /// Name, title and entity share the single `name` override and differ
    /// only in their defaults.
    pub fn setting_key(&self) -> &'static str {
        match self {
            Self::Name | Self::Title | Self::Entity => "name",
            Self::BaseUrl => "url",
            Self::Slogan => "slogan",
            Self::ColorPrimary => "color",
            Self::ImprintUrl => "imprintUrl",
            Self::ITunesAppId => "iTunesAppId",
            Self::IosClientUrl => "iOSClientUrl",
            Self::AndroidClientUrl => "AndroidClientUrl",
        }
    }

    /// Attribute whose value is reported after reverting a setting key
    pub fn reported_after_undo(key: &str) -> Option<Self> {
        match key {
            "name" => Some(Self::Entity),
            "url" => Some(Self::BaseUrl),
            "slogan" => Some(Self::Slogan),
            "color" => Some(Self::ColorPrimary),
            "imprintUrl" => Some(Self::ImprintUrl),
            "iTunesAppId" => Some(Self::ITunesAppId),
            "iOSClientUrl" => Some(Self::IosClientUrl),
            "AndroidClientUrl" => Some(Self::AndroidClientUrl),
            _ => None,
        }
    }

    /// Built-in default
    pub fn default_value<'a>(&self, defaults: &'a BrandingDefaults) -> &'a str {
        match self {
            Self::Name => &defaults.name,
            Self::Title => &defaults.title,
            Self::Entity => &defaults.entity,
            Self::BaseUrl => &defaults.base_url,
            Self::Slogan => &defaults.slogan,
            Self::ColorPrimary => &defaults.color,
            Self::ImprintUrl => &defaults.imprint_url,
            Self::ITunesAppId => &defaults.itunes_app_id,
            Self::IosClientUrl => &defaults.ios_client_url,
            Self::AndroidClientUrl => &defaults.android_client_url,
        }
    }

    pub fn sanitization(&self) -> Sanitization {
        match self {
            Self::Name | Self::Title | Self::Entity => Sanitization::StripTags,
            Self::Slogan => Sanitization::EscapeHtml,
            _ => Sanitization::None,
        }
    }
}

impl fmt::Display for BrandingAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BrandingAttribute {
    type Err = ThemingError;

    /// Accepts the CLI name, or the setting key for unshared keys
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attr| attr.as_str() == s)
            .or_else(|| match s {
                "url" => Some(Self::BaseUrl),
                "colorPrimary" => Some(Self::ColorPrimary),
                "imprintUrl" => Some(Self::ImprintUrl),
                "iTunesAppId" => Some(Self::ITunesAppId),
                "iOSClientUrl" => Some(Self::IosClientUrl),
                "AndroidClientUrl" => Some(Self::AndroidClientUrl),
                _ => None,
            })
            .ok_or_else(|| ThemingError::UnknownAttribute(s.to_string()))
    }
}
