//! Integration tests for Settings loading.
//!
//! These tests use temp directories for the local config only.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use doctree::config::Settings;
use doctree::infrastructure::di::ServiceContainer;

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".doctree.toml"),
        r#"
default_language = "pl"
translations_dir = "tests/resources/translations"
pretty_json = false
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.default_language, "pl");
    assert_eq!(
        settings.translations_dir,
        PathBuf::from("tests/resources/translations")
    );
    assert!(!settings.pretty_json);
}

#[test]
fn given_invalid_local_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".doctree.toml"), "pretty_json = \"maybe\"").unwrap();

    let result = Settings::load(Some(dir.path()));

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("config error"));
}

#[test]
fn given_configured_translations_dir_when_container_loads_then_translates() {
    let settings = Settings {
        translations_dir: PathBuf::from("tests/resources/translations"),
        ..Settings::default()
    };
    let container = ServiceContainer::new(settings);

    let langs = container.load_translations().unwrap();

    assert_eq!(langs, vec!["de", "pl"]);
    assert_eq!(
        container.translations.translate("pl", "Cancel [context: reject]"),
        "Anuluj"
    );
}
