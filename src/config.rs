//! Session configuration.
//!
//! Timing constants, theme catalog additions and the portfolio profile.
//! Read from a JSON file; every field is optional and falls back to the
//! defaults below. CLI flags are applied on top by the binary.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::content::Profile;
use crate::themes::{ThemeError, ThemeStore, builtin_catalog, DEFAULT_THEME};
use crate::types::{Theme, ThemeKey};

/// Directory under the platform config dir holding `config.json`.
pub const CONFIG_DIR_NAME: &str = "terminal-folio";

/// File name looked up inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Theme(#[from] ThemeError),
}

/// Everything tunable about a session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Delay between banner characters.
    pub char_interval_ms: u64,
    /// Pause after the banner is fully shown, before the shell appears.
    pub settle_delay_ms: u64,
    /// Window after a submission during which further input is ignored.
    pub submit_cooldown_ms: u64,
    /// Key of the theme active at start.
    pub initial_theme: String,
    /// Start directly in the shell, without the banner.
    pub skip_boot: bool,
    /// Extra themes. A key matching a built-in replaces it in place;
    /// new keys are appended in key order.
    pub themes: BTreeMap<String, Theme>,
    /// Text shown by the content commands.
    pub profile: Profile,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            char_interval_ms: 1,
            settle_delay_ms: 1300,
            submit_cooldown_ms: 300,
            initial_theme: DEFAULT_THEME.to_string(),
            skip_boot: false,
            themes: BTreeMap::new(),
            profile: Profile::default(),
        }
    }
}

impl SessionConfig {
    /// Parse a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load from `path` if given, else from the default location if that
    /// file exists, else defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => SessionConfig::load(p),
            None => match default_path() {
                Some(p) if p.is_file() => SessionConfig::load(&p),
                _ => Ok(SessionConfig::default()),
            },
        }
    }

    /// Built-in catalog merged with the configured themes.
    pub fn catalog(&self) -> Vec<(ThemeKey, Theme)> {
        let mut catalog = builtin_catalog();
        for (key, theme) in &self.themes {
            match catalog.iter_mut().find(|(k, _)| k == key) {
                Some(slot) => slot.1 = theme.clone(),
                None => catalog.push((key.clone(), theme.clone())),
            }
        }
        catalog
    }

    /// Build the validated theme store for this config.
    pub fn theme_store(&self) -> Result<ThemeStore, ConfigError> {
        Ok(ThemeStore::new(self.catalog(), &self.initial_theme)?)
    }

    pub fn char_interval(&self) -> Duration {
        Duration::from_millis(self.char_interval_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn submit_cooldown(&self) -> Duration {
        Duration::from_millis(self.submit_cooldown_ms)
    }
}

/// `<config_dir>/terminal-folio/config.json`, if the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_match_documented_tuning() {
        let config = SessionConfig::default();
        assert_eq!(config.settle_delay(), Duration::from_millis(1300));
        assert_eq!(config.submit_cooldown(), Duration::from_millis(300));
        assert_eq!(config.initial_theme, "dark");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = write_config(r#"{ "settle_delay_ms": 50, "initial_theme": "ubuntu" }"#);
        let config = SessionConfig::load(file.path()).unwrap();
        assert_eq!(config.settle_delay_ms, 50);
        assert_eq!(config.submit_cooldown_ms, 300);
        assert_eq!(config.theme_store().unwrap().active_key(), "ubuntu");
    }

    #[test]
    fn unknown_field_is_rejected() {
        let file = write_config(r#"{ "settle_delay": 50 }"#);
        let err = SessionConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SessionConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn explicit_path_is_used_by_resolve() {
        let file = write_config(r#"{ "skip_boot": true }"#);
        let config = SessionConfig::resolve(Some(file.path())).unwrap();
        assert!(config.skip_boot);
    }

    #[test]
    fn custom_theme_is_appended_and_override_replaces_in_place() {
        let file = write_config(
            r##"{
                "themes": {
                    "dark": { "name": "Darker", "background": "#000000", "foreground": "#00ff00",
                              "accent": "#00ffff", "secondary": "#111111" },
                    "solar": { "name": "Solar", "background": "#002b36", "foreground": "#839496",
                               "accent": "#b58900", "secondary": "#073642" }
                }
            }"##,
        );
        let config = SessionConfig::load(file.path()).unwrap();
        let store = config.theme_store().unwrap();
        let listed: Vec<(&str, &str)> = store.list().map(|(k, t)| (k, t.name.as_str())).collect();
        assert_eq!(listed[0], ("dark", "Darker"));
        assert_eq!(listed.last(), Some(&("solar", "Solar")));
        assert_eq!(listed.len(), 7);
    }

    #[test]
    fn invalid_theme_color_surfaces_as_config_error() {
        let file = write_config(
            r##"{ "themes": { "bad": { "name": "Bad", "background": "black",
                  "foreground": "#ffffff", "accent": "#ffffff", "secondary": "#000000" } } }"##,
        );
        let config = SessionConfig::load(file.path()).unwrap();
        let err = config.theme_store().unwrap_err();
        assert!(matches!(err, ConfigError::Theme(ThemeError::InvalidColor { .. })));
    }

    #[test]
    fn mixed_case_theme_key_is_rejected() {
        let file = write_config(
            r##"{ "themes": { "Solar": { "name": "Solar", "background": "#002b36",
                  "foreground": "#839496", "accent": "#b58900", "secondary": "#073642" } } }"##,
        );
        let config = SessionConfig::load(file.path()).unwrap();
        let err = config.theme_store().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Theme(ThemeError::UnselectableKey(ref key)) if key == "Solar"
        ));
    }

    #[test]
    fn unknown_initial_theme_is_rejected() {
        let config = SessionConfig {
            initial_theme: "nope".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.theme_store(),
            Err(ConfigError::Theme(ThemeError::KeyNotFound(_)))
        ));
    }
}
