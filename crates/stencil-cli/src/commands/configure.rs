//! `stencil configure`: merge a template into an app's `package.json`.
//!
//! Runs the whole sequence in order:
//! 1. Resolve the template (installing a package if needed)
//! 2. Read its `.template.dependencies.json`
//! 3. Merge it into the manifest
//! 4. Remove `<DIR>/temp` if step 1 may have installed there, unless
//!    `--keep-temp`
//!
//! Cleanup runs even when an earlier step fails. `--dry-run` never installs
//! and never cleans up: only templates already on disk resolve.

use std::path::Path;

use stencil_adapters::LocalFilesystem;
use stencil_core::{
    application::{TemplateResolver, ports::Filesystem},
    domain::{AppPackage, configure_app_package, resolve_against},
    error::StencilError,
};
use tracing::{info, instrument};

use crate::{
    cli::ConfigureArgs,
    commands::{
        build_resolver, dir_name, finish_with_cleanup, install_options, original_directory,
        own_path,
    },
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(template = %args.template, manifest = %args.package_json.display()))]
pub fn execute(args: ConfigureArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let dir = original_directory(args.dir.as_deref())?;
    let own = own_path(&args.resolver, &config)?;
    let manifest_path = resolve_against(&dir, &args.package_json);

    let filesystem = LocalFilesystem::new();
    if !filesystem.exists(&manifest_path) {
        return Err(CliError::ManifestNotFound {
            path: manifest_path,
        });
    }
    let mut app = AppPackage::from_json(&filesystem.read_to_string(&manifest_path)?)
        .map_err(StencilError::from)?;

    let options = install_options(&args.resolver, &config).offline(args.dry_run);
    let resolver = build_resolver(options, &output);
    if args.dry_run {
        info!("dry run: package templates are not installed");
    }

    let merged = merge_template(&resolver, &args.template, &mut app, &own, &dir);
    let keep_temp = args.keep_temp || args.dry_run;
    if !finish_with_cleanup(&resolver, &args.template, &dir, keep_temp, merged)? {
        output.info("Template declares no dependencies; package.json left unchanged")?;
        return Ok(());
    }

    let json = app.to_json_pretty().map_err(StencilError::from)?;
    if args.dry_run {
        output.data(json.trim_end())?;
        return Ok(());
    }

    filesystem.write_file(&manifest_path, &json)?;
    info!(path = %manifest_path.display(), "manifest written");
    output.success(&format!("Updated {}", manifest_path.display()))?;
    output.print("Run npm install (or yarn) to fetch the new dependencies.")?;
    Ok(())
}

/// Resolve, read and merge. `Ok(false)` if the template declares nothing to
/// merge.
fn merge_template(
    resolver: &TemplateResolver,
    template: &str,
    app: &mut AppPackage,
    own: &Path,
    dir: &Path,
) -> CliResult<bool> {
    let app_name = app.name.clone().unwrap_or_else(|| dir_name(dir));

    let template_path = resolver
        .template_path(template, &app_name, own, dir)?
        .ok_or_else(|| CliError::TemplateNotFound {
            template: template.to_string(),
        })?;

    let Some(template_config) = resolver
        .template_config(Some(template_path.as_path()), own)?
        .filter(|config| !config.is_empty())
    else {
        return Ok(false);
    };

    configure_app_package(app, &template_config);
    Ok(true)
}
