//! `stencil cleanup`: remove `<DIR>/temp`.

use stencil_core::application::temp_install_dir;
use tracing::instrument;

use crate::{
    cli::CleanupArgs,
    commands::{build_resolver, original_directory},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: CleanupArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let dir = original_directory(args.dir.as_deref())?;
    let resolver = build_resolver(config.install_options(), &output);

    resolver.cleanup(&dir)?;

    output.success(&format!("Cleaned up {}", temp_install_dir(&dir).display()))?;
    Ok(())
}
