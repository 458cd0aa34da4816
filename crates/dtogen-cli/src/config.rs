//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the resulting
//! [`GenerationOptions`].
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `DTOGEN__GENERATION__RULE=namespace-prefix`
//! 3. Config file (`--config`, else the platform config directory)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File, FileFormat};
use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use dtogen_adapters::RendererKind;
use dtogen_core::{
    application::GenerationOptions,
    domain::{CustomTypeRule, DEFAULT_DTO_NAMESPACE_SUFFIX},
};

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Generation settings.
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub rule: CustomTypeRule,
    pub dto_namespace_suffix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    /// Default renderer (`csharp` or `json`).
    pub format: String,
    /// Default output directory for `generate`.
    pub directory: PathBuf,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            rule: CustomTypeRule::Registry,
            dto_namespace_suffix: DEFAULT_DTO_NAMESPACE_SUFFIX.into(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: RendererKind::CSharp.to_string(),
            directory: PathBuf::from("generated"),
        }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// `config_file` is the path passed via `--config`; it must exist unless
    /// `must_exist` is false (`dtogen init` creates it). Without it the
    /// default location is used when present.
    pub fn load(config_file: Option<&PathBuf>, must_exist: bool) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), must_exist),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default()).context("Invalid built-in defaults")?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(Environment::with_prefix("DTOGEN").separator("__"))
            .build()
            .with_context(|| format!("Failed to read configuration from '{}'", path.display()))?
            .try_deserialize()
            .context("Invalid configuration values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.dtogen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "dtogen", "dtogen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".dtogen.toml"))
    }

    /// Options handed to the core services.
    pub fn generation_options(&self, rule: Option<CustomTypeRule>) -> GenerationOptions {
        GenerationOptions {
            rule: rule.unwrap_or(self.generation.rule),
            dto_namespace_suffix: self.generation.dto_namespace_suffix.clone(),
        }
    }

    /// Configured default renderer.
    pub fn renderer(&self) -> Result<RendererKind, String> {
        self.output.format.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_rule_is_registry() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.generation.rule, CustomTypeRule::Registry);
        assert_eq!(cfg.generation.dto_namespace_suffix, "Dtos");
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn missing_optional_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(&temp.path().join("absent.toml"), false).unwrap();
        assert_eq!(cfg.output.format, "csharp");
        assert_eq!(cfg.output.directory, PathBuf::from("generated"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.toml");
        assert!(AppConfig::load(Some(&path), true).is_err());
        assert_eq!(AppConfig::load(Some(&path), false).unwrap(), AppConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "[generation]\nrule = \"namespace-prefix\"\n\n[output]\nformat = \"json\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path), true).unwrap();
        assert_eq!(cfg.generation.rule, CustomTypeRule::NamespacePrefix);
        assert_eq!(cfg.generation.dto_namespace_suffix, "Dtos");
        assert_eq!(cfg.renderer(), Ok(RendererKind::Json));
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn cli_rule_overrides_config() {
        let cfg = AppConfig::default();
        let options = cfg.generation_options(Some(CustomTypeRule::NamespacePrefix));
        assert_eq!(options.rule, CustomTypeRule::NamespacePrefix);
        assert_eq!(cfg.generation_options(None).rule, CustomTypeRule::Registry);
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
