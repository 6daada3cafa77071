//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/doctree/doctree.toml`
//! 3. Local config: `<dir>/.doctree.toml` (usually the working directory)
//! 4. Environment variables: `DOCTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub default_language: Option<String>,
    pub translations_dir: Option<PathBuf>,
    pub pretty_json: Option<bool>,
}

/// Unified configuration for doctree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Language used when none is given (default: "en")
    pub default_language: String,
    /// Directory holding `<lang>.toml` dictionaries
    pub translations_dir: PathBuf,
    /// Pretty-print JSON output (default: true)
    pub pretty_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_language: "en".into(),
            translations_dir: default_translations_dir(),
            pretty_json: true,
        }
    }
}

fn default_translations_dir() -> PathBuf {
    global_config_dir()
        .map(|dir| dir.join("translations"))
        .unwrap_or_else(|| PathBuf::from("~/.config/doctree/translations"))
}

/// Get the XDG config directory for doctree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "doctree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("doctree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".doctree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.translations_dir.to_string_lossy().as_ref());
        self.translations_dir = PathBuf::from(expanded);
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            default_language: overlay
                .default_language
                .clone()
                .unwrap_or_else(|| self.default_language.clone()),
            translations_dir: overlay
                .translations_dir
                .clone()
                .unwrap_or_else(|| self.translations_dir.clone()),
            pretty_json: overlay.pretty_json.unwrap_or(self.pretty_json),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory searched for `.doctree.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply DOCTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("DOCTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("default_language") {
            settings.default_language = val;
        }
        if let Ok(val) = config.get_string("translations_dir") {
            settings.translations_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_bool("pretty_json") {
            settings.pretty_json = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# doctree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/doctree/doctree.toml
#   Local:  ./.doctree.toml
#   Env:    DOCTREE_* environment variables

# Language used by `doctree translate` when --lang is not given
# default_language = "en"

# Directory with one <lang>.toml dictionary per language:
#   "Cancel [context: reject]" = "Anuluj"
# translations_dir = "~/.config/doctree/translations"

# Pretty-print JSON output
# pretty_json = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
