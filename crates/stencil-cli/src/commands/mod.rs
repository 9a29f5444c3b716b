//! Command handlers.
//!
//! Each handler translates CLI arguments into core calls and prints the
//! outcome. Resolver wiring shared by several commands lives here.

use std::path::{Path, PathBuf};

use stencil_adapters::{LocalFilesystem, ProcessRunner};
use stencil_core::{
    application::{InstallOptions, TemplateResolver},
    domain::{PackageManager, resolve_against},
};
use tracing::{debug, warn};

use crate::{
    cli::ResolverArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub mod cleanup;
pub mod config;
pub mod configure;
pub mod init;
pub mod resolve;
pub mod show_config;

/// Config values with CLI overrides applied.
pub(crate) fn install_options(args: &ResolverArgs, config: &AppConfig) -> InstallOptions {
    let mut options = config.install_options();
    if args.use_yarn {
        options.package_manager = PackageManager::Yarn;
    }
    if let Some(strategy) = args.strategy {
        options.strategy = strategy.into();
    }
    options.verbose(options.verbose || args.verbose_install)
}

/// A resolver wired to the real filesystem and package manager.
pub(crate) fn build_resolver(options: InstallOptions, output: &OutputManager) -> TemplateResolver {
    debug!(
        package_manager = %options.package_manager,
        strategy = %options.strategy,
        verbose = options.verbose,
        offline = options.offline,
        "resolver options"
    );

    TemplateResolver::new(
        Box::new(LocalFilesystem::new()),
        Box::new(ProcessRunner::new()),
        Box::new(output.clone()),
        options,
    )
}

/// Remove `<dir>/temp` once `outcome` is known, if resolving `template` may
/// have installed there and the caller did not ask to keep it.
///
/// A failed cleanup is returned only when `outcome` succeeded; otherwise it
/// is logged and `outcome`'s error wins.
pub(crate) fn finish_with_cleanup<T>(
    resolver: &TemplateResolver,
    template: &str,
    dir: &Path,
    keep_temp: bool,
    outcome: CliResult<T>,
) -> CliResult<T> {
    if keep_temp || !resolver.uses_temp_dir(template) {
        return outcome;
    }

    match (resolver.cleanup(dir), outcome) {
        (Ok(()), outcome) => outcome,
        (Err(err), Ok(_)) => Err(err.into()),
        (Err(err), Err(primary)) => {
            warn!(error = %err, "cleanup failed after an earlier error");
            Err(primary)
        }
    }
}

/// The directory holding the bundled `template/`.
///
/// `--own-path`, then `templates.own_path`, then the executable's directory.
pub(crate) fn own_path(args: &ResolverArgs, config: &AppConfig) -> CliResult<PathBuf> {
    if let Some(path) = args.own_path.as_ref().or(config.templates.own_path.as_ref()) {
        return Ok(path.clone());
    }

    let exe = std::env::current_exe().with_cli_context(|| "locating the stencil executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| CliError::ConfigError {
            message: format!("'{}' has no parent directory", exe.display()),
            source: None,
        })
}

/// Absolute original directory: `--dir` against the current directory.
pub(crate) fn original_directory(dir: Option<&Path>) -> CliResult<PathBuf> {
    let cwd = std::env::current_dir().with_cli_context(|| "reading the current directory")?;
    Ok(match dir {
        Some(dir) => resolve_against(&cwd, dir),
        None => cwd,
    })
}

/// Last path segment, used as the app name when none is given.
pub(crate) fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "app".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Strategy;
    use stencil_adapters::{MemoryFilesystem, ScriptedRunner, SilentReporter};
    use stencil_core::{
        application::{ApplicationError, ports::Filesystem},
        domain::InstallStrategy,
        error::StencilResult,
    };

    const DIR: &str = "/work/my-app";

    /// Everything exists; nothing can be removed.
    struct UnremovableTemp;

    impl Filesystem for UnremovableTemp {
        fn exists(&self, _path: &Path) -> bool {
            true
        }

        fn read_to_string(&self, _path: &Path) -> StencilResult<String> {
            Ok(String::new())
        }

        fn create_dir_all(&self, _path: &Path) -> StencilResult<()> {
            Ok(())
        }

        fn write_file(&self, _path: &Path, _content: &str) -> StencilResult<()> {
            Ok(())
        }

        fn remove_dir_all(&self, path: &Path) -> StencilResult<()> {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "permission denied".into(),
            }
            .into())
        }
    }

    fn resolver_over(filesystem: impl Filesystem + 'static) -> TemplateResolver {
        TemplateResolver::new(
            Box::new(filesystem),
            Box::new(ScriptedRunner::new()),
            Box::new(SilentReporter),
            InstallOptions::default(),
        )
    }

    #[test]
    fn cleanup_skipped_for_local_templates() {
        let filesystem = MemoryFilesystem::new().with_file("/work/my-app/temp/notes.txt", "mine");
        let resolver = resolver_over(filesystem.clone());

        finish_with_cleanup(&resolver, "./tpl", Path::new(DIR), false, Ok(())).unwrap();
        finish_with_cleanup(&resolver, "", Path::new(DIR), false, Ok(())).unwrap();

        assert!(filesystem.exists(Path::new("/work/my-app/temp/notes.txt")));
    }

    #[test]
    fn cleanup_runs_for_package_templates_unless_kept() {
        let filesystem =
            MemoryFilesystem::new().with_dir("/work/my-app/temp/node_modules/cra-template");
        let resolver = resolver_over(filesystem.clone());

        finish_with_cleanup(&resolver, "cra-template", Path::new(DIR), true, Ok(())).unwrap();
        assert!(filesystem.exists(Path::new("/work/my-app/temp")));

        finish_with_cleanup(&resolver, "cra-template", Path::new(DIR), false, Ok(())).unwrap();
        assert!(!filesystem.exists(Path::new("/work/my-app/temp")));
    }

    #[test]
    fn earlier_error_survives_failed_cleanup() {
        let resolver = resolver_over(UnremovableTemp);
        let outcome: CliResult<()> = Err(CliError::TemplateNotFound {
            template: "cra-template".into(),
        });

        let err = finish_with_cleanup(&resolver, "cra-template", Path::new(DIR), false, outcome)
            .unwrap_err();

        assert!(matches!(err, CliError::TemplateNotFound { .. }));
    }

    #[test]
    fn failed_cleanup_is_reported_after_success() {
        let resolver = resolver_over(UnremovableTemp);

        let err = finish_with_cleanup(&resolver, "cra-template", Path::new(DIR), false, Ok(()))
            .unwrap_err();

        assert!(matches!(err, CliError::Core(_)));
    }

    #[test]
    fn flags_override_config() {
        let config = AppConfig::default();
        let args = ResolverArgs {
            use_yarn: true,
            strategy: Some(Strategy::Global),
            own_path: None,
            verbose_install: true,
        };

        let options = install_options(&args, &config);
        assert_eq!(options.package_manager, PackageManager::Yarn);
        assert_eq!(options.strategy, InstallStrategy::Global);
        assert!(options.verbose);
    }

    #[test]
    fn absent_flags_keep_config() {
        let mut config = AppConfig::default();
        config.resolver.package_manager = PackageManager::Yarn;
        config.resolver.verbose = true;

        let options = install_options(&ResolverArgs::default(), &config);
        assert_eq!(options.package_manager, PackageManager::Yarn);
        assert!(options.verbose);
    }

    #[test]
    fn own_path_prefers_flag_then_config() {
        let mut config = AppConfig::default();
        config.templates.own_path = Some(PathBuf::from("/from/config"));

        let flagged = ResolverArgs {
            own_path: Some(PathBuf::from("/from/flag")),
            ..ResolverArgs::default()
        };
        assert_eq!(own_path(&flagged, &config).unwrap(), PathBuf::from("/from/flag"));
        assert_eq!(
            own_path(&ResolverArgs::default(), &config).unwrap(),
            PathBuf::from("/from/config")
        );
    }

    #[test]
    fn own_path_defaults_next_to_executable() {
        let path = own_path(&ResolverArgs::default(), &AppConfig::default()).unwrap();
        assert!(path.is_absolute());
    }

    #[test]
    fn dir_name_falls_back() {
        assert_eq!(dir_name(Path::new("/work/my-app")), "my-app");
        assert_eq!(dir_name(Path::new("/")), "app");
    }
}
