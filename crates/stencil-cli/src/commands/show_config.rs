//! `stencil show-config`: print a template's declared dependencies.

use tracing::instrument;

use crate::{
    cli::ShowConfigArgs,
    commands::{
        build_resolver, dir_name, finish_with_cleanup, install_options, original_directory,
        own_path,
    },
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: ShowConfigArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let dir = original_directory(args.dir.as_deref())?;
    let own = own_path(&args.resolver, &config)?;
    let resolver = build_resolver(install_options(&args.resolver, &config), &output);

    let template = args.template.unwrap_or_default();
    let shown = resolver
        .template_path(&template, &dir_name(&dir), &own, &dir)
        .map_err(CliError::from)
        .and_then(|path| match path {
            Some(path) => Ok(resolver.template_config(Some(path.as_path()), &own)?),
            None => Err(CliError::TemplateNotFound {
                template: template.clone(),
            }),
        });
    let shown = finish_with_cleanup(&resolver, &template, &dir, args.keep_temp, shown)?;

    match shown {
        Some(template_config) => {
            output.data(&serde_json::to_string_pretty(&template_config)?)?;
        }
        None => {
            output.info("Template declares no dependencies (no .template.dependencies.json)")?;
        }
    }
    Ok(())
}
