//! The single writer of branding overrides

use crate::audit::AuditLog;
use crate::error::{ThemingError, ThemingResult};
use crate::store::{SettingsStore, THEMING_NAMESPACE};
use crate::theming::attribute::BrandingAttribute;
use crate::theming::cache_buster::{CacheBuster, CACHE_BUSTER_KEY};
use crate::theming::resolver::OverrideResolver;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Setting keys accepted from administrators
pub const KNOWN_SETTINGS: [&str; 12] = [
    "name",
    "url",
    "slogan",
    "color",
    "imprintUrl",
    "iTunesAppId",
    "iOSClientUrl",
    "AndroidClientUrl",
    "logoMime",
    "logoheaderMime",
    "backgroundMime",
    "faviconMime",
];

const MAX_NAME_LEN: usize = 250;
const MAX_URL_LEN: usize = 500;

/// Check an administrator-supplied value before it is stored
pub fn validate_setting(key: &str, value: &str) -> ThemingResult<()> {
    if !KNOWN_SETTINGS.contains(&key) {
        return Err(ThemingError::invalid_setting(key, "unknown setting"));
    }

    let too_long = |max: usize| {
        ThemingError::invalid_setting(key, format!("longer than {} characters", max))
    };

    match key {
        "name" if value.chars().count() > MAX_NAME_LEN => Err(too_long(MAX_NAME_LEN)),
        "url" | "slogan" | "imprintUrl" if value.chars().count() > MAX_URL_LEN => {
            Err(too_long(MAX_URL_LEN))
        }
        "color" if !is_hex_color(value) => Err(ThemingError::invalid_setting(
            key,
            format!("'{}' is not a #rgb or #rrggbb color", value),
        )),
        _ => Ok(()),
    }
}

fn is_hex_color(value: &str) -> bool {
    value.strip_prefix('#').is_some_and(|hex| {
        matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
    })
}

/// Persists overrides and invalidates everything derived from them
#[derive(Clone)]
pub struct SettingsMutator {
    store: Arc<dyn SettingsStore>,
    buster: CacheBuster,
    resolver: OverrideResolver,
    audit: Option<Arc<AuditLog>>,
}

impl SettingsMutator {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        buster: CacheBuster,
        resolver: OverrideResolver,
    ) -> Self {
        Self {
            store,
            buster,
            resolver,
            audit: None,
        }
    }

    pub fn with_audit(mut self, audit: AuditLog) -> Self {
        self.audit = Some(Arc::new(audit));
        self
    }

    /// Store `value` under `key`, then bump the cache buster
    ///
    /// Returns the new cache-buster version.
    pub async fn set(&self, key: &str, value: &str) -> ThemingResult<u64> {
        self.check_writable(key).await?;
        self.store.set_value(THEMING_NAMESPACE, key, value).await?;
        let version = self.buster.increase().await?;
        debug!("Set {} (version {})", key, version);

        self.record("setting.set", json!({ "key": key, "value": value, "version": version }))
            .await;
        Ok(version)
    }

    /// Drop the override for `key`, then bump the cache buster
    ///
    /// Returns the value now in effect for the key, or an empty string when
    /// the key has no attribute behind it.
    pub async fn undo(&self, key: &str) -> ThemingResult<String> {
        self.check_writable(key).await?;
        self.store.delete_value(THEMING_NAMESPACE, key).await?;
        let version = self.buster.increase().await?;
        debug!("Reverted {} (version {})", key, version);

        self.record("setting.undo", json!({ "key": key, "version": version }))
            .await;

        Ok(match BrandingAttribute::reported_after_undo(key) {
            Some(attribute) => self.resolver.resolve(attribute).await,
            None => String::new(),
        })
    }

    /// Refuse writes that would move the version backwards
    async fn check_writable(&self, key: &str) -> ThemingResult<()> {
        if key == CACHE_BUSTER_KEY {
            return Err(ThemingError::invalid_setting(
                key,
                "reserved for the cache buster",
            ));
        }
        self.buster.stored().await.map(|_| ())
    }

    async fn record(&self, event: &str, data: serde_json::Value) {
        if let Some(audit) = &self.audit {
            audit.log(event, &data).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::LogoImageKind;
    use crate::store::MemorySettingsStore;
    use crate::theming::test_support::*;
    use async_trait::async_trait;
    use tempfile::TempDir;

    #[test]
    fn known_settings_cover_attributes_and_uploads() {
        for attribute in BrandingAttribute::ALL {
            assert!(KNOWN_SETTINGS.contains(&attribute.setting_key()));
        }
        for kind in LogoImageKind::ALL {
            assert!(KNOWN_SETTINGS.contains(&kind.mime_setting()));
        }
        assert!(!KNOWN_SETTINGS.contains(&"cachebuster"));
    }

    #[test]
    fn validation_rules() {
        assert!(validate_setting("color", "#112233").is_ok());
        assert!(validate_setting("color", "#fff").is_ok());
        assert!(validate_setting("color", "112233").is_err());
        assert!(validate_setting("color", "#12345").is_err());
        assert!(validate_setting("color", "#gggggg").is_err());

        assert!(validate_setting("name", &"n".repeat(250)).is_ok());
        assert!(validate_setting("name", &"n".repeat(251)).is_err());
        assert!(validate_setting("slogan", &"s".repeat(501)).is_err());
        assert!(validate_setting("imprintUrl", "https://acme.example/legal").is_ok());

        let err = validate_setting("cachebuster", "9").unwrap_err();
        assert!(matches!(err, ThemingError::InvalidSetting { .. }));
    }

    #[tokio::test]
    async fn undo_reports_value_in_effect() {
        let fx = fixture(false);

        fx.theming.set("name", "Other").await.unwrap();
        assert_eq!(fx.theming.undo("name").await.unwrap(), "ACME Cloud");

        fx.theming.set("color", "#000000").await.unwrap();
        assert_eq!(fx.theming.undo("color").await.unwrap(), "#0082c9");

        assert_eq!(fx.theming.undo("logoMime").await.unwrap(), "");
    }

    #[tokio::test]
    async fn set_returns_new_version() {
        let fx = fixture(false);
        assert_eq!(fx.theming.set("slogan", "a").await.unwrap(), 1);
        assert_eq!(fx.theming.set("slogan", "b").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn mutations_are_audited() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("audit.log");
        let fx = fixture(false);
        let theming = fx.theming.clone().with_audit(AuditLog::at(&path));

        theming.set("color", "#112233").await.unwrap();
        theming.undo("color").await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        let events: Vec<serde_json::Value> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["event"], "setting.set");
        assert_eq!(events[0]["data"]["version"], 1);
        assert_eq!(events[1]["event"], "setting.undo");
        assert_eq!(events[1]["data"]["key"], "color");
    }

    #[tokio::test]
    async fn cache_buster_key_is_not_writable() {
        let fx = fixture(false);
        for _ in 0..5 {
            fx.theming.set("slogan", "again").await.unwrap();
        }

        let err = fx.theming.set(CACHE_BUSTER_KEY, "0").await.unwrap_err();
        assert!(matches!(err, ThemingError::InvalidSetting { .. }));
        assert_eq!(fx.theming.cache_buster().current().await, 5);

        assert!(fx.theming.undo(CACHE_BUSTER_KEY).await.is_err());
        assert_eq!(fx.theming.cache_buster().current().await, 5);

        assert_eq!(fx.theming.set("slogan", "later").await.unwrap(), 6);
    }

    #[tokio::test]
    async fn version_increases_across_mixed_writes() {
        let fx = fixture(false);
        let mut last = fx.theming.cache_buster().current().await;

        for key in KNOWN_SETTINGS {
            let set = fx.theming.set(key, "x").await.unwrap();
            assert!(set > last);
            fx.theming.undo(key).await.unwrap();
            let undone = fx.theming.cache_buster().current().await;
            assert!(undone > set);
            last = undone;
        }
        // Undoing something never set still counts as a write
        fx.theming.undo("unknownKey").await.unwrap();
        assert!(fx.theming.cache_buster().current().await > last);
    }

    #[tokio::test]
    async fn corrupt_version_blocks_writes_before_persisting() {
        let fx = fixture(false);
        fx.store
            .set_value(THEMING_NAMESPACE, CACHE_BUSTER_KEY, "seven")
            .await
            .unwrap();

        let err = fx.theming.set("slogan", "Hello").await.unwrap_err();
        assert!(matches!(err, ThemingError::CorruptVersion(_)));
        assert!(fx.store.get_value(THEMING_NAMESPACE, "slogan").await.is_none());
    }

    /// Store whose writes always fail
    struct BrokenStore(MemorySettingsStore);

    #[async_trait]
    impl SettingsStore for BrokenStore {
        async fn get_value(&self, namespace: &str, key: &str) -> Option<String> {
            self.0.get_value(namespace, key).await
        }

        async fn set_value(
            &self,
            _namespace: &str,
            key: &str,
            _value: &str,
        ) -> ThemingResult<()> {
            Err(ThemingError::SettingsPersist {
                key: key.to_string(),
                reason: "read-only".to_string(),
            })
        }

        async fn delete_value(&self, _namespace: &str, key: &str) -> ThemingResult<()> {
            Err(ThemingError::SettingsPersist {
                key: key.to_string(),
                reason: "read-only".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn persist_failure_leaves_cache_and_version_alone() {
        use crate::cache::{DistributedCache, InstanceNamespaces, MemoryCache};
        use crate::config::BrandingDefaults;
        use crate::host::{
            FsAppManager, FsImageManager, LuminanceColorUtility, RouteUrlGenerator, Untranslated,
        };
        use crate::theming::{FixedRasterizer, Theming, ThemingServices};

        let dir = TempDir::new().unwrap();
        let store: Arc<dyn SettingsStore> = Arc::new(BrokenStore(MemorySettingsStore::new()));
        let cache = MemoryCache::new();
        let urls = Arc::new(RouteUrlGenerator::new(BASE_URL));
        let services = ThemingServices {
            store: store.clone(),
            cache: Arc::new(cache.clone()),
            images: Arc::new(FsImageManager::new(dir.path(), store.clone(), urls.clone())),
            urls,
            apps: Arc::new(FsAppManager::new(Vec::new())),
            colors: Arc::new(LuminanceColorUtility),
            translator: Arc::new(Untranslated),
        };
        let theming = Theming::new(
            services,
            BrandingDefaults::default(),
            Arc::new(FixedRasterizer(false)),
        );

        theming.scss_variables().await;
        let ns = InstanceNamespaces::for_instance(BASE_URL);
        assert_eq!(cache.len(&ns.variables), 1);

        let err = theming.set("color", "#112233").await.unwrap_err();
        assert!(matches!(err, ThemingError::SettingsPersist { .. }));
        assert!(theming.undo("color").await.is_err());

        // Nothing was invalidated and the version never moved
        assert_eq!(cache.len(&ns.variables), 1);
        assert_eq!(theming.cache_buster().current().await, 0);
        assert!(cache.create(&ns.variables).get("getScssVariables").await.is_some());
    }
}
