//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `GOGOGO_*` environment variables, `__` between sections
//!    (`GOGOGO_STEPS__GO=/usr/local/go/bin/go`)
//! 3. Config file (`--config`, or the platform config dir)
//! 4. Built-in defaults (always present)

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use gogogo_core::application::DEFAULT_SENTINEL;
use gogogo_core::domain::DEFAULT_MODULE_PREFIX;

const ENV_PREFIX: &str = "GOGOGO";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Template and naming settings.
    pub generator: GeneratorConfig,
    /// External tools run after materialization.
    pub steps: StepsConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub module_prefix: String,
    pub templates_dir: Option<PathBuf>,
    pub sentinel: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            module_prefix: DEFAULT_MODULE_PREFIX.into(),
            templates_dir: None,
            sentinel: DEFAULT_SENTINEL.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepsConfig {
    pub go: String,
    pub templ: String,
    pub download_assets: bool,
}

impl Default for StepsConfig {
    fn default() -> Self {
        Self {
            go: "go".into(),
            templ: "templ".into(),
            download_assets: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from the file and the process environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_with_env(config_file, None)
    }

    /// Like [`Self::load`], but reads `GOGOGO_*` variables from `env` instead
    /// of the process environment when given.
    pub fn load_with_env(
        config_file: Option<&PathBuf>,
        env: Option<HashMap<String, String>>,
    ) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::from(Self::config_path()).required(false),
        }
        .format(FileFormat::Toml);

        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(env);

        let config: Self = Config::builder()
            .add_source(file)
            .add_source(environment)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.gogogo.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "brainmaniac", "gogogo")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".gogogo.toml"))
    }
}
