//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{self, Config, ConfigManager};
use crate::error::{ThemingError, ThemingResult};
use crate::ui::{self, Status, UiContext};
use std::path::PathBuf;

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    manager: &ConfigManager,
    config: &Config,
) -> ThemingResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => show_path(manager),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => set_value(manager, config, &key, &value).await?,
    }

    Ok(())
}

fn show_config(config: &Config) -> ThemingResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(manager: &ConfigManager, force: bool) -> ThemingResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step(
            &ctx,
            Status::Warn,
            &format!("Config already exists at {}", path.display()),
            Some("use --force to overwrite"),
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;

    ui::step(
        &ctx,
        Status::Ok,
        "Configuration initialized",
        Some(path.display().to_string().as_str()),
    );

    Ok(())
}

async fn set_value(
    manager: &ConfigManager,
    config: &Config,
    key: &str,
    value: &str,
) -> ThemingResult<()> {
    let ctx = UiContext::detect();
    let mut config = config.clone();

    // Parse dot-separated key path
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "log_format"] => config.general.log_format = value.to_string(),
        ["general", "audit_log"] => config.general.audit_log = parse_bool(value)?,

        ["instance", "base_url"] => config.instance.base_url = value.to_string(),

        ["defaults", "name"] => config.defaults.name = value.to_string(),
        ["defaults", "title"] => config.defaults.title = value.to_string(),
        ["defaults", "entity"] => config.defaults.entity = value.to_string(),
        ["defaults", "base_url"] => config.defaults.base_url = value.to_string(),
        ["defaults", "slogan"] => config.defaults.slogan = value.to_string(),
        ["defaults", "color"] => config.defaults.color = value.to_string(),
        ["defaults", "imprint_url"] => config.defaults.imprint_url = value.to_string(),
        ["defaults", "itunes_app_id"] => config.defaults.itunes_app_id = value.to_string(),
        ["defaults", "ios_client_url"] => config.defaults.ios_client_url = value.to_string(),
        ["defaults", "android_client_url"] => {
            config.defaults.android_client_url = value.to_string()
        }

        ["storage", "dir"] => config.storage.dir = Some(PathBuf::from(value)),
        ["storage", "apps_dirs"] => {
            config.storage.apps_dirs = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .collect();
        }

        ["icons", "probe"] => config.icons.probe = parse_bool(value)?,
        ["icons", "magick_binary"] => config.icons.magick_binary = Some(value.to_string()),

        _ => {
            ui::step(&ctx, Status::Fail, &format!("Unknown config key: {}", key), None);
            ui::remark(&ctx, "Valid keys:");
            print_valid_keys();
            return Err(ThemingError::User(format!("Unknown config key: {}", key)));
        }
    }

    config::validate(&config).map_err(|reason| ThemingError::ConfigInvalid {
        path: manager.path().to_path_buf(),
        reason,
    })?;

    manager.save(&config).await?;
    ui::step(&ctx, Status::Ok, &format!("Set {} = {}", key, value), None);

    Ok(())
}

fn parse_bool(value: &str) -> ThemingResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ThemingError::User(format!(
            "Invalid boolean value: {}. Use true/false",
            value
        ))),
    }
}

fn print_valid_keys() {
    let keys = [
        "general.log_format",
        "general.audit_log",
        "instance.base_url",
        "defaults.name",
        "defaults.title",
        "defaults.entity",
        "defaults.base_url",
        "defaults.slogan",
        "defaults.color",
        "defaults.imprint_url",
        "defaults.itunes_app_id",
        "defaults.ios_client_url",
        "defaults.android_client_url",
        "storage.dir",
        "storage.apps_dirs",
        "icons.probe",
        "icons.magick_binary",
    ];

    for key in keys {
        eprintln!("  {}", key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert!(parse_bool("yes").unwrap());
        assert!(!parse_bool("FALSE").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[tokio::test]
    async fn set_value_persists_and_validates() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp.path().join("config.toml"));
        let config = Config::default();

        set_value(&manager, &config, "defaults.entity", "ACME Cloud")
            .await
            .unwrap();
        let loaded = manager.load().await.unwrap();
        assert_eq!(loaded.defaults.entity, "ACME Cloud");

        let err = set_value(&manager, &loaded, "instance.base_url", "nope")
            .await
            .unwrap_err();
        assert!(matches!(err, ThemingError::ConfigInvalid { .. }));

        assert!(set_value(&manager, &loaded, "vm.name", "x").await.is_err());
    }
}
