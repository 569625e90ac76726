//! Integration tests for the theming CLI

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Isolated config + state directory
    struct Env {
        dir: TempDir,
        config: PathBuf,
    }

    impl Env {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let state = dir.path().join("state");
            let apps = dir.path().join("apps");
            let config = dir.path().join("config.toml");

            std::fs::write(
                &config,
                format!(
                    r#"[instance]
base_url = "https://cloud.test"

[defaults]
name = "ACME"
title = "ACME Portal"
entity = "ACME Cloud"
base_url = "https://acme.example"
slogan = ""

[storage]
dir = {:?}
apps_dirs = [{:?}]

[icons]
probe = false
"#,
                    state.display().to_string(),
                    apps.display().to_string()
                ),
            )
            .unwrap();

            Self { dir, config }
        }

        fn cmd(&self) -> Command {
            let mut cmd = cargo_bin_cmd!("theming");
            cmd.arg("--config").arg(&self.config);
            cmd
        }

        fn state(&self) -> &Path {
            self.dir.path()
        }
    }

    #[test]
    fn help_displays() {
        cargo_bin_cmd!("theming")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("branding overrides"));
    }

    #[test]
    fn version_displays() {
        cargo_bin_cmd!("theming")
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("theming"));
    }

    #[test]
    fn missing_explicit_config_fails() {
        let dir = TempDir::new().unwrap();
        cargo_bin_cmd!("theming")
            .arg("--config")
            .arg(dir.path().join("missing.toml"))
            .arg("footer")
            .assert()
            .failure()
            .stderr(predicate::str::contains("config init"));
    }

    #[test]
    fn get_returns_default() {
        let env = Env::new();
        env.cmd()
            .args(["get", "entity"])
            .assert()
            .success()
            .stdout("ACME Cloud\n");
    }

    #[test]
    fn get_unknown_attribute_fails_with_hint() {
        let env = Env::new();
        env.cmd()
            .args(["get", "bogus"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn set_then_get_then_undo() {
        let env = Env::new();

        env.cmd()
            .args(["set", "slogan", "Data <em>safe</em>"])
            .assert()
            .success()
            .stdout(predicate::str::contains("cache buster 1"));

        env.cmd()
            .args(["get", "slogan"])
            .assert()
            .success()
            .stdout("Data <em>safe</em>\n");

        env.cmd()
            .args(["undo", "slogan"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Reverted slogan"));

        env.cmd().args(["get", "slogan"]).assert().success().stdout("\n");
    }

    #[test]
    fn set_rejects_invalid_color() {
        let env = Env::new();
        env.cmd()
            .args(["set", "color", "blue"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("#rgb or #rrggbb"));
    }

    #[test]
    fn vars_reflect_latest_write() {
        let env = Env::new();

        env.cmd()
            .args(["vars"])
            .assert()
            .success()
            .stdout(predicate::str::contains("$theming-cachebuster: '0';"))
            .stdout(predicate::str::contains("color-primary").not());

        env.cmd().args(["set", "color", "#112233"]).assert().success();

        env.cmd()
            .args(["vars", "--json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"color-primary\": \"#112233\""))
            .stdout(predicate::str::contains("\"color-primary-text\": \"#ffffff\""))
            .stdout(predicate::str::contains("\"theming-cachebuster\": \"'1'\""));
    }

    #[test]
    fn footer_follows_imprint_url() {
        let env = Env::new();

        env.cmd().args(["footer"]).assert().success().stdout(
            "<a href=\"https://acme.example\" target=\"_blank\" rel=\"noreferrer noopener\">ACME Cloud</a>\n",
        );

        env.cmd()
            .args(["set", "imprintUrl", "https://acme.example/legal"])
            .assert()
            .success();
        env.cmd()
            .args(["footer"])
            .assert()
            .success()
            .stdout(predicate::str::contains("class=\"legal\""));

        env.cmd()
            .args(["set", "imprintUrl", "not-a-url"])
            .assert()
            .success();
        env.cmd()
            .args(["footer"])
            .assert()
            .success()
            .stdout(predicate::str::contains("legal").not());
    }

    #[test]
    fn image_path_versions_manifest_url() {
        let env = Env::new();

        env.cmd()
            .args(["image-path", "notes", "manifest.json"])
            .assert()
            .success()
            .stdout("/apps/theming/manifest?v=0\n");

        env.cmd().args(["set", "name", "Other"]).assert().success();

        env.cmd()
            .args(["image-path", "notes", "manifest.json"])
            .assert()
            .success()
            .stdout("/apps/theming/manifest?v=1\n");
    }

    #[test]
    fn image_path_passes_through_other_files() {
        let env = Env::new();
        env.cmd()
            .args(["image-path", "core", "logo.svg"])
            .assert()
            .success()
            .stdout(predicate::str::contains("unchanged"));
    }

    #[test]
    fn logo_falls_back_to_core() {
        let env = Env::new();
        env.cmd()
            .args(["logo"])
            .assert()
            .success()
            .stdout("/core/img/logo.svg?v=0\n");
        env.cmd()
            .args(["logo", "--png"])
            .assert()
            .success()
            .stdout("/core/img/logo.png?v=0\n");
    }

    #[test]
    fn icons_unsupported_when_probe_disabled() {
        let env = Env::new();
        env.cmd()
            .args(["icons"])
            .assert()
            .success()
            .stdout(predicate::str::contains("unsupported"));
    }

    #[test]
    fn show_lists_overrides_as_json() {
        let env = Env::new();
        env.cmd().args(["set", "name", "Other"]).assert().success();

        let output = env
            .cmd()
            .args(["show", "--format", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let entity = rows
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["attribute"] == "entity")
            .unwrap();
        assert_eq!(entity["value"], "Other");
        assert_eq!(entity["overridden"], true);
    }

    #[test]
    fn writes_are_audited() {
        let env = Env::new();
        env.cmd().args(["set", "slogan", "x"]).assert().success();

        let log = std::fs::read_to_string(env.state().join("state/audit.log")).unwrap();
        assert!(log.contains("\"setting.set\""));
    }

    #[test]
    fn config_path() {
        let env = Env::new();
        env.cmd()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let env = Env::new();
        env.cmd()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[defaults]"))
            .stdout(predicate::str::contains("ACME Cloud"));
    }

    #[test]
    fn config_set_updates_defaults() {
        let env = Env::new();
        env.cmd()
            .args(["config", "set", "defaults.entity", "Globex"])
            .assert()
            .success();

        env.cmd()
            .args(["get", "entity"])
            .assert()
            .success()
            .stdout("Globex\n");
    }

    #[test]
    fn config_set_unknown_key_fails() {
        let env = Env::new();
        env.cmd()
            .args(["config", "set", "vm.name", "x"])
            .assert()
            .failure();
    }
}
