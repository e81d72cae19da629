//! `deepblue config`: inspect and initialise the configuration file.

use std::path::PathBuf;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
///
/// `config_file` is the `--config` override, if any.
pub fn execute(
    cmd: ConfigCommands,
    config: AppConfig,
    config_file: Option<PathBuf>,
    output: OutputManager,
) -> CliResult<()> {
    let path = config_file.unwrap_or_else(AppConfig::config_path);

    match cmd {
        ConfigCommands::Get { key } => {
            let value = config.get(&key).ok_or_else(|| unknown_key(&key))?;
            output.emit(&value)?;
        }

        ConfigCommands::List => {
            output.header(&format!("# {}", path.display()))?;
            output.emit(&to_toml(&config)?)?;
        }

        ConfigCommands::Path => {
            output.emit(&path.display().to_string())?;
        }

        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                output.warning(&format!(
                    "Config already exists at {}  (use --force to overwrite)",
                    path.display(),
                ))?;
                return Ok(());
            }

            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_cli_context(|| {
                    format!("Failed to create config directory '{}'", parent.display())
                })?;
            }
            std::fs::write(&path, to_toml(&AppConfig::default())?)
                .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))?;

            output.success(&format!("Configuration created at {}", path.display()))?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn to_toml(config: &AppConfig) -> CliResult<String> {
    toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })
}

fn unknown_key(key: &str) -> CliError {
    CliError::ConfigError {
        message: format!(
            "Unknown config key '{key}' (known keys: {})",
            AppConfig::KEYS.join(", ")
        ),
        source: None,
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
