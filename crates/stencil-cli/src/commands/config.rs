//! `stencil config`: inspect configuration values.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            output.data(&get_config_value(&config, &key)?)?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.data(serialised.trim_end())?;
        }

        ConfigCommands::Path => {
            output.data(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "resolver.package_manager" => Ok(config.resolver.package_manager.to_string()),
        "resolver.strategy" => Ok(config.resolver.strategy.to_string()),
        "resolver.verbose" => Ok(config.resolver.verbose.to_string()),
        "templates.own_path" => Ok(config
            .templates
            .own_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
