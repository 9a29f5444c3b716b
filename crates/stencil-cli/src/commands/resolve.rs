//! `stencil resolve`: print the directory a template resolves to.

use tracing::{info, instrument};

use crate::{
    cli::ResolveArgs,
    commands::{build_resolver, dir_name, install_options, original_directory, own_path},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Resolve (installing if needed) and print the template directory.
///
/// Package installs under the temp-prefix strategy are left in place, the
/// printed path points into them. `stencil cleanup` removes them.
#[instrument(skip_all, fields(template = %args.template))]
pub fn execute(args: ResolveArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let dir = original_directory(args.dir.as_deref())?;
    let own = own_path(&args.resolver, &config)?;
    let app_name = args.app_name.clone().unwrap_or_else(|| dir_name(&dir));

    let resolver = build_resolver(install_options(&args.resolver, &config), &output);

    let path = resolver
        .template_path(&args.template, &app_name, &own, &dir)?
        .ok_or_else(|| CliError::TemplateNotFound {
            template: args.template.clone(),
        })?;

    info!(path = %path.display(), "template resolved");
    output.data(&path.display().to_string())?;
    Ok(())
}
