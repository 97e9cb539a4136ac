//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by reference.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `MEDTRACK__<SECTION>__<KEY>`
//! 3. Config file (TOML)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use uuid::{Uuid, uuid};

use medtrack_core::domain::NumberLocale;

use crate::{
    cli::global::GlobalArgs,
    error::{CliError, CliResult},
};

/// Application that owns the medication action plan when none is configured.
pub const DEFAULT_APPLICATION_ID: Uuid = uuid!("708995a6-4fba-42de-97a8-5feb54e944e8");

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where medications and action plans are kept.
    pub storage: StorageConfig,
    /// Identity used when creating action plans.
    pub application: ApplicationConfig,
    /// How typed amounts are read.
    pub form: FormConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store file. `None` means the platform data directory.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    pub decimal_separator: String,
    pub grouping_separator: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig { path: None },
            application: ApplicationConfig {
                id: DEFAULT_APPLICATION_ID,
            },
            form: FormConfig {
                decimal_separator: ".".into(),
                grouping_separator: None,
            },
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// A file passed with `--config` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let path = config_file.cloned().unwrap_or_else(Self::config_path);

        let settings = Config::builder()
            .add_source(Config::try_from(&Self::default()).context("Invalid built-in defaults")?)
            .add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(config_file.is_some()),
            )
            .add_source(
                Environment::with_prefix("MEDTRACK")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        let config: Self = settings
            .try_deserialize()
            .context("Configuration has invalid values")?;
        config.number_locale().map_err(anyhow::Error::new)?;

        tracing::debug!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.medtrack.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "medtrack", "medtrack")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".medtrack.toml"))
    }

    /// Default store location under the platform data directory.
    pub fn default_store_path() -> PathBuf {
        directories::ProjectDirs::from("com", "medtrack", "medtrack")
            .map(|d| d.data_dir().join("medications.json"))
            .unwrap_or_else(|| PathBuf::from(".medtrack").join("medications.json"))
    }

    /// Store file: `--store`, then `storage.path`, then the default.
    pub fn store_path(&self, global: &GlobalArgs) -> PathBuf {
        global
            .store
            .clone()
            .or_else(|| self.storage.path.clone())
            .unwrap_or_else(Self::default_store_path)
    }

    /// Config file in effect for this invocation.
    pub fn active_config_path(global: &GlobalArgs) -> PathBuf {
        global.config.clone().unwrap_or_else(Self::config_path)
    }

    /// Separators for amount inputs.
    pub fn number_locale(&self) -> CliResult<NumberLocale> {
        let decimal = single_char("form.decimal_separator", &self.form.decimal_separator)?;
        let grouping = self
            .form
            .grouping_separator
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| single_char("form.grouping_separator", s))
            .transpose()?;

        if grouping == Some(decimal) {
            return Err(CliError::ConfigError {
                message: "form.grouping_separator must differ from form.decimal_separator".into(),
                source: None,
            });
        }
        Ok(NumberLocale::new(decimal, grouping))
    }

    /// Render as TOML, as written by `medtrack init`.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: "Failed to serialise configuration".into(),
            source: Some(Box::new(e)),
        })
    }

    /// Read a single dotted key.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "storage.path" => self
                .storage
                .path
                .as_deref()
                .map(Path::display)
                .map(|p| p.to_string())
                .unwrap_or_else(|| "(default)".into()),
            "application.id" => self.application.id.to_string(),
            "form.decimal_separator" => self.form.decimal_separator.clone(),
            "form.grouping_separator" => self
                .form
                .grouping_separator
                .clone()
                .unwrap_or_else(|| "(none)".into()),
            "output.no_color" => self.output.no_color.to_string(),
            "output.format" => self.output.format.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Every key understood by [`Self::get`].
    pub const KEYS: [&'static str; 6] = [
        "storage.path",
        "application.id",
        "form.decimal_separator",
        "form.grouping_separator",
        "output.no_color",
        "output.format",
    ];
}

fn single_char(key: &str, value: &str) -> CliResult<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(CliError::ConfigError {
            message: format!("{key} must be a single character, got '{value}'"),
            source: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.application.id, DEFAULT_APPLICATION_ID);
        assert!(cfg.storage.path.is_none());
        assert!(!cfg.output.no_color);
        assert_eq!(cfg.number_locale().unwrap(), NumberLocale::posix());
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[form]\ndecimal_separator = \",\"\ngrouping_separator = \".\"\n\n\
             [storage]\npath = \"/data/meds.json\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.number_locale().unwrap(), NumberLocale::new(',', Some('.')));
        assert_eq!(cfg.storage.path.as_deref(), Some(Path::new("/data/meds.json")));
        assert_eq!(cfg.application.id, DEFAULT_APPLICATION_ID);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn bad_separator_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.form.decimal_separator = "..".into();
        assert!(matches!(cfg.number_locale(), Err(CliError::ConfigError { .. })));

        let mut cfg = AppConfig::default();
        cfg.form.grouping_separator = Some(".".into());
        assert!(cfg.number_locale().is_err());
    }

    #[test]
    fn toml_round_trip_through_loader() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, AppConfig::default().to_toml().unwrap()).unwrap();
        assert_eq!(AppConfig::load(Some(&path)).unwrap(), AppConfig::default());
    }

    #[test]
    fn every_key_is_readable() {
        let cfg = AppConfig::default();
        for key in AppConfig::KEYS {
            assert!(cfg.get(key).is_some(), "{key}");
        }
        assert!(cfg.get("defaults.lang").is_none());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
        assert!(AppConfig::default_store_path().ends_with("medications.json"));
    }
}
