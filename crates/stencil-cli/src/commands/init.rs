//! `stencil init`: create a default configuration file.

use crate::{
    cli::InitArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Create a default Stencil configuration file.
pub fn execute(args: InitArgs, output: OutputManager) -> CliResult<()> {
    output.info("Initialising configuration...")?;

    let config_path = AppConfig::config_path();

    // Bail early if the file already exists and --force was not given.
    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    let toml = toml::to_string_pretty(&AppConfig::default()).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise default config: {e}"),
        source: Some(Box::new(e)),
    })?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(&config_path, &toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", config_path.display()))?;

    output.success(&format!(
        "Configuration created at {}",
        config_path.display(),
    ))?;

    Ok(())
}
