//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `DEEPBLUE_*` environment variables, `__` between nesting levels
//!    (`DEEPBLUE_DEFAULTS__DATABASE=redis`)
//! 3. Config file (`--config FILE`, or [`AppConfig::config_path`])
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fallbacks for `deepblue init` when a flag is absent and detection
    /// finds nothing.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub technology: Option<String>,
    pub database: Option<String>,
    pub port: Option<u32>,
    /// Write `.dockerignore` next to the Dockerfile.
    pub dockerignore: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            technology: None,
            database: None,
            port: None,
            dockerignore: true,
        }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let path = config_file.cloned().unwrap_or_else(Self::config_path);
        debug!(path = %path.display(), explicit = config_file.is_some(), "Loading configuration");

        Self::builder(&path, config_file.is_some())?
            .add_source(
                Environment::with_prefix("DEEPBLUE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Load only defaults and `path`, ignoring the environment.
    #[cfg(test)]
    fn load_file(path: &Path) -> anyhow::Result<Self> {
        Self::builder(path, true)?
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    fn builder(
        path: &Path,
        required: bool,
    ) -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to serialise defaults")?;
        Ok(Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).format(FileFormat::Toml).required(required)))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.deepblue.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "deepblue", "deepblue")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".deepblue.toml"))
    }

    /// Look up a dotted key, e.g. `defaults.port`.
    ///
    /// Unset optional values are the empty string.
    pub fn get(&self, key: &str) -> Option<String> {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        match key {
            "defaults.technology" => Some(text(&self.defaults.technology)),
            "defaults.database" => Some(text(&self.defaults.database)),
            "defaults.port" => Some(self.defaults.port.map(|p| p.to_string()).unwrap_or_default()),
            "defaults.dockerignore" => Some(self.defaults.dockerignore.to_string()),
            "output.no_color" => Some(self.output.no_color.to_string()),
            _ => None,
        }
    }

    /// Every key [`get`](Self::get) understands.
    pub const KEYS: [&'static str; 5] = [
        "defaults.technology",
        "defaults.database",
        "defaults.port",
        "defaults.dockerignore",
        "output.no_color",
    ];
}
