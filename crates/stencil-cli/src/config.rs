//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the
//! [`InstallOptions`] built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `STENCIL__<SECTION>__<KEY>`
//! 3. Config file: `--config FILE`, else the platform config dir, else
//!    `.stencil.toml` in the current directory
//! 4. Built-in defaults (always present)

use std::path::PathBuf;

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use stencil_core::{
    application::InstallOptions,
    domain::{InstallStrategy, PackageManager},
};
use tracing::debug;

/// Name of the per-project config file.
pub const LOCAL_CONFIG_FILE: &str = ".stencil.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// How package templates are installed.
    pub resolver: ResolverConfig,
    /// Where the bundled template lives.
    pub templates: TemplatesConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub package_manager: PackageManager,
    pub strategy: InstallStrategy,
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Directory holding `template/`. Defaults to the executable's directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub own_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration, layering file and environment over defaults.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist. Without it, the default locations are optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to build default configuration")?;
        let mut builder = Config::builder().add_source(defaults);

        match config_file {
            Some(path) => {
                debug!(path = %path.display(), "loading config file");
                builder = builder.add_source(
                    File::from(path.as_path())
                        .format(FileFormat::Toml)
                        .required(true),
                );
            }
            None => {
                for path in [Self::config_path(), PathBuf::from(LOCAL_CONFIG_FILE)] {
                    builder = builder.add_source(
                        File::from(path)
                            .format(FileFormat::Toml)
                            .required(false),
                    );
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("STENCIL")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Install options before any CLI overrides.
    pub fn install_options(&self) -> InstallOptions {
        InstallOptions::new(self.resolver.package_manager, self.resolver.strategy)
            .verbose(self.resolver.verbose)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.stencil.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "stencil", "stencil")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_use_npm_and_temp_prefix() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.resolver.package_manager, PackageManager::Npm);
        assert_eq!(cfg.resolver.strategy, InstallStrategy::TempPrefix);
        assert!(!cfg.output.no_color);
        assert!(cfg.templates.own_path.is_none());
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stencil.toml");
        fs::write(
            &path,
            "[resolver]\npackage_manager = \"yarn\"\nstrategy = \"global\"\n\n[templates]\nown_path = \"/opt/stencil\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(cfg.resolver.package_manager, PackageManager::Yarn);
        assert_eq!(cfg.resolver.strategy, InstallStrategy::Global);
        assert!(!cfg.resolver.verbose);
        assert_eq!(cfg.templates.own_path, Some(PathBuf::from("/opt/stencil")));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[resolver]\nstrategy = \"cache\"\n").unwrap();

        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let toml = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let back: AppConfig = toml::from_str(&toml).unwrap();
        assert_eq!(back, AppConfig::default());
    }

    #[test]
    fn install_options_follow_resolver_section() {
        let mut cfg = AppConfig::default();
        cfg.resolver.package_manager = PackageManager::Yarn;
        cfg.resolver.verbose = true;

        let options = cfg.install_options();
        assert_eq!(options.package_manager, PackageManager::Yarn);
        assert_eq!(options.strategy, InstallStrategy::TempPrefix);
        assert!(options.verbose);
    }
}
