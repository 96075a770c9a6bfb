//! Integration tests for wgt

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FLASH_TEMPLATE: &str =
    "<object data=\"{in.url}\" width=\"{in.width}\" height=\"{in.height}\"></object>";

const CONFIG_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<widget xmlns="http://www.w3.org/ns/widgets" id="{in.id}" version="1.0" width="{in.width}" height="{in.height}">
  <name>{in.name}</name>
  <content src="{in.startFile}"/>
</widget>
"#;

const CLOCK_MANIFEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<widget xmlns="http://www.w3.org/ns/widgets"
        xmlns:ub="http://uniboard.mnemis.com/widgets"
        id="http://example.org/clock" version="2.0"
        width="640" height="480" ub:resizable="true">
  <name>Clock</name>
  <name xml:lang="fr">Horloge</name>
  <author href="http://example.org" email="dev@example.org">Example</author>
  <preference name="style" value="analog"/>
  <content src="clock.html"/>
</widget>
"#;

fn fixture_config_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("wgt.toml")
}

fn wgt_cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("wgt");
    cmd.env("WGT_CONFIG", fixture_config_path());
    cmd
}

/// Isolated home with a config pointing at temporary resources and library
struct WidgetHarness {
    home: TempDir,
    config_path: PathBuf,
    library: PathBuf,
}

impl WidgetHarness {
    fn new() -> io::Result<Self> {
        let home = TempDir::new()?;
        let resources = home.path().join("resources");
        let library = home.path().join("library");
        let etc = resources.join("etc");
        fs::create_dir_all(&etc)?;
        fs::write(
            etc.join("npapi-wrapper.application.x-shockwave-flash.swf.htm"),
            FLASH_TEMPLATE,
        )?;
        fs::write(etc.join("npapi-wrapper.config.xml"), CONFIG_TEMPLATE)?;

        let config_path = home.path().join("wgt.toml");
        fs::write(
            &config_path,
            format!(
                "resources-path = {:?}\nlibrary-path = {:?}\n",
                resources.to_string_lossy(),
                library.to_string_lossy()
            ),
        )?;

        Ok(WidgetHarness {
            home,
            config_path,
            library,
        })
    }

    fn command(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("wgt");
        cmd.env("HOME", self.home.path());
        cmd.env("WGT_CONFIG", &self.config_path);
        cmd
    }

    fn path(&self) -> &Path {
        self.home.path()
    }

    fn write_clock_package(&self) -> io::Result<PathBuf> {
        let package = self.path().join("Clock.wgt");
        fs::create_dir_all(&package)?;
        fs::write(package.join("config.xml"), CLOCK_MANIFEST)?;
        fs::write(package.join("clock.html"), "<html></html>")?;
        Ok(package)
    }
}

#[test]
fn test_version() {
    wgt_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wgt"));
}

#[test]
fn test_help() {
    wgt_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("wgt inspects W3C widget packages"));
}

#[test]
fn test_invalid_command() {
    wgt_cmd().arg("invalid").assert().failure();
}

#[test]
fn test_config_show() {
    wgt_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration:"))
        .stdout(predicate::str::contains("fr_FR"));
}

#[test]
fn test_config_path() {
    wgt_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wgt.toml"));
}

#[test]
fn test_config_set_unknown_key_fails() {
    wgt_cmd()
        .args(["config", "set", "cache-path", "/tmp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key: cache-path"));
}

#[test]
fn test_config_set_round_trip() {
    let Ok(env) = WidgetHarness::new() else {
        return;
    };
    env.command()
        .args(["config", "set", "locale", "de_DE"])
        .assert()
        .success();

    let contents = fs::read_to_string(&env.config_path).unwrap_or_default();
    assert!(contents.contains("locale = \"de_DE\""));
    assert!(contents.contains("resources-path"));
}

#[test]
fn test_inspect_prints_localized_descriptor() {
    let Ok(env) = WidgetHarness::new() else {
        return;
    };
    let Ok(package) = env.write_clock_package() else {
        return;
    };

    env.command()
        .arg("inspect")
        .arg(&package)
        .args(["--locale", "fr_FR"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Horloge"))
        .stdout(predicate::str::contains("640x480"))
        .stdout(predicate::str::contains("style = analog"));
}

#[test]
fn test_inspect_json_from_file_inside_package() {
    let Ok(env) = WidgetHarness::new() else {
        return;
    };
    let Ok(package) = env.write_clock_package() else {
        return;
    };

    env.command()
        .arg("inspect")
        .arg(package.join("clock.html"))
        .args(["--json", "--locale", "en_US"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Clock\""))
        .stdout(predicate::str::contains("\"entry\": \"clock.html\""))
        .stdout(predicate::str::contains("\"resizable\": true"));
}

#[test]
fn test_inspect_missing_entry_fails() {
    let Ok(env) = WidgetHarness::new() else {
        return;
    };
    let package = env.path().join("Broken.wgt");
    let _ = fs::create_dir_all(&package);
    let _ = fs::write(package.join("config.xml"), CLOCK_MANIFEST);

    env.command()
        .arg("inspect")
        .arg(&package)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot load widget package"));
}

#[test]
fn test_templates_lists_registered_keys() {
    let Ok(env) = WidgetHarness::new() else {
        return;
    };
    env.command()
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("application/x-shockwave-flash"))
        .stdout(predicate::str::contains("swf"));
}

#[test]
fn test_wrap_creates_package_in_library() {
    let Ok(env) = WidgetHarness::new() else {
        return;
    };
    let expected = env.library.join("intro.wgt");

    env.command()
        .args([
            "wrap",
            "http://example.org/media/intro.swf",
            "--mime",
            "application/x-shockwave-flash",
            "--width",
            "640",
            "--height",
            "480",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("intro.wgt"));

    let index = fs::read_to_string(expected.join("index.htm")).unwrap_or_default();
    assert!(index.contains("data=\"http://example.org/media/intro.swf\""));
    assert!(index.contains("width=\"640\" height=\"480\""));

    env.command()
        .arg("inspect")
        .arg(&expected)
        .args(["--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"width\": 640"));
}

#[test]
fn test_wrap_unknown_type_fails_without_output() {
    let Ok(env) = WidgetHarness::new() else {
        return;
    };
    env.command()
        .args(["wrap", "http://example.org/song.ogg", "--mime", "audio/ogg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No wrapper template"));
    assert!(!env.library.exists());
}

#[test]
fn test_wrap_html_from_stdin_never_overwrites() {
    let Ok(env) = WidgetHarness::new() else {
        return;
    };
    let out = env.path().join("out");

    for _ in 0..2 {
        env.command()
            .args(["wrap-html", "-", "--name", "Note", "--out"])
            .arg(&out)
            .write_stdin("<p>hello</p>")
            .assert()
            .success();
    }

    let first = fs::read_to_string(out.join("Note.wgt").join("Note.html")).unwrap_or_default();
    assert!(first.contains("<p>hello</p>"));
    assert!(out.join("Note1.wgt").join("config.xml").is_file());
}
