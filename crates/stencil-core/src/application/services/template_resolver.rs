//! Template Resolver - main application orchestrator.
//!
//! This service implements the four steps an app generator runs, in order:
//! 1. Resolve the template to a directory (bundled, local, or installed)
//! 2. Read the template's `.template.dependencies.json`
//! 3. Merge it into the app manifest (pure, see [`crate::domain::configure_app_package`])
//! 4. Remove the temporary install directory
//!
//! Lookups that come up empty return `Ok(None)`. A package manager that
//! exits non-zero is an error carrying the full command line; it is never
//! retried.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandRunner, Filesystem, ProgressReporter},
    },
    domain::{
        CommandLine, CommandOutcome, InstallLocation, InstallStrategy, PackageManager,
        PackageSpec, Stdio, TEMPLATE_CONFIG_FILE, TemplateConfig, TemplateReference,
        resolve_against,
    },
    error::StencilResult,
};

/// Directory under the original directory used by [`InstallStrategy::TempPrefix`].
pub const TEMP_INSTALL_DIR: &str = "temp";

/// Directory under the tool's own path holding the bundled template.
pub const DEFAULT_TEMPLATE_DIR: &str = "template";

/// How packages are installed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallOptions {
    pub package_manager: PackageManager,
    pub strategy: InstallStrategy,
    /// Pass `--verbose` to npm installs.
    pub verbose: bool,
    /// Never install: a package missing from disk resolves to `None`.
    pub offline: bool,
}

impl InstallOptions {
    pub fn new(package_manager: PackageManager, strategy: InstallStrategy) -> Self {
        Self {
            package_manager,
            strategy,
            verbose: false,
            offline: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }
}

/// Resolves, installs, reads and cleans up templates.
pub struct TemplateResolver {
    filesystem: Box<dyn Filesystem>,
    runner: Box<dyn CommandRunner>,
    reporter: Box<dyn ProgressReporter>,
    options: InstallOptions,
}

impl TemplateResolver {
    /// Create a new resolver with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use stencil_core::application::{InstallOptions, TemplateResolver};
    ///
    /// let resolver = TemplateResolver::new(
    ///     filesystem, // impl Filesystem
    ///     runner,     // impl CommandRunner
    ///     reporter,   // impl ProgressReporter
    ///     InstallOptions::default(),
    /// );
    /// ```
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        runner: Box<dyn CommandRunner>,
        reporter: Box<dyn ProgressReporter>,
        options: InstallOptions,
    ) -> Self {
        Self {
            filesystem,
            runner,
            reporter,
            options,
        }
    }

    pub fn options(&self) -> InstallOptions {
        self.options
    }

    /// Resolve `template` to a directory holding its files.
    ///
    /// An empty `template` selects `own_path/template` without checking that
    /// it exists. Anything else goes through [`Self::find_or_install`].
    #[instrument(
        skip_all,
        fields(
            template = %template,
            app = %app_name,
            original_directory = %original_directory.display()
        )
    )]
    pub fn template_path(
        &self,
        template: &str,
        app_name: &str,
        own_path: &Path,
        original_directory: &Path,
    ) -> StencilResult<Option<PathBuf>> {
        let reference = TemplateReference::parse(template)?;

        let resolved = match &reference {
            TemplateReference::Default => Some(default_template_dir(own_path)),
            other => self.locate(original_directory, other)?,
        };

        if resolved.is_some() {
            let described = match &reference {
                TemplateReference::Default => "the default template".to_string(),
                other => format!("template {other}"),
            };
            self.progress(&format!("Creating {app_name} using {described}..."));
        }

        Ok(resolved)
    }

    /// Find a template on disk, installing it first if it is a package.
    ///
    /// Path references never trigger an install.
    pub fn find_or_install(
        &self,
        original_directory: &Path,
        template: &str,
    ) -> StencilResult<Option<PathBuf>> {
        let reference = TemplateReference::parse(template)?;
        self.locate(original_directory, &reference)
    }

    /// Read `.template.dependencies.json` from `template_path`, falling back
    /// to the bundled template under `own_path`.
    #[instrument(skip(self))]
    pub fn template_config(
        &self,
        template_path: Option<&Path>,
        own_path: &Path,
    ) -> StencilResult<Option<TemplateConfig>> {
        let file = template_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_template_dir(own_path))
            .join(TEMPLATE_CONFIG_FILE);

        if !self.filesystem.exists(&file) {
            debug!(path = %file.display(), "template declares no dependencies");
            return Ok(None);
        }

        let raw = self.filesystem.read_to_string(&file)?;
        let config = TemplateConfig::from_json(&raw).map_err(|e| {
            ApplicationError::InvalidTemplateConfig {
                path: file.clone(),
                reason: e.to_string(),
            }
        })?;

        info!(path = %file.display(), "template config loaded");
        Ok(Some(config))
    }

    /// Whether resolving `template` may install into `original_directory/temp`.
    ///
    /// Only package references under [`InstallStrategy::TempPrefix`] do, and
    /// only when installs are allowed. Callers use this to decide whether
    /// [`Self::cleanup`] is theirs to run.
    pub fn uses_temp_dir(&self, template: &str) -> bool {
        !self.options.offline
            && self.options.strategy == InstallStrategy::TempPrefix
            && matches!(
                TemplateReference::parse(template),
                Ok(TemplateReference::Package(_))
            )
    }

    /// Remove `original_directory/temp`. Missing is fine.
    #[instrument(skip(self))]
    pub fn cleanup(&self, original_directory: &Path) -> StencilResult<()> {
        let dir = temp_install_dir(original_directory);
        if !self.filesystem.exists(&dir) {
            debug!(path = %dir.display(), "nothing to clean up");
            return Ok(());
        }

        self.filesystem.remove_dir_all(&dir)?;
        info!(path = %dir.display(), "temporary install directory removed");
        Ok(())
    }

    /// Ask the package manager where global packages live.
    ///
    /// `Ok(None)` if it answered with nothing.
    pub fn global_install_path(&self) -> StencilResult<Option<PathBuf>> {
        let manager = self.options.package_manager;
        let outcome = self.run_command(&manager.global_dir_command(), Stdio::Capture)?;

        Ok(outcome
            .output()
            .map(|dir| manager.global_packages_root(Path::new(dir))))
    }

    /// Install `spec` with the configured package manager.
    pub fn install_template(
        &self,
        spec: &PackageSpec,
        location: InstallLocation<'_>,
    ) -> StencilResult<()> {
        self.progress(&format!("Installing {spec}..."));

        let command = self.options.package_manager.install_command(
            spec,
            location,
            self.options.verbose,
        );
        self.run_command(&command, Stdio::Inherit)?;

        self.progress("Installed!");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn locate(
        &self,
        original_directory: &Path,
        reference: &TemplateReference,
    ) -> StencilResult<Option<PathBuf>> {
        self.progress(&format!("Finding template {reference}..."));

        match reference {
            TemplateReference::Default => {
                warn!("no template named; nothing to locate");
                Ok(None)
            }
            TemplateReference::Path(path) => {
                let candidate = resolve_against(original_directory, path);
                Ok(self.find_by_path(&candidate).then_some(candidate))
            }
            TemplateReference::Package(spec) => {
                self.find_or_install_package(original_directory, spec)
            }
        }
    }

    fn find_or_install_package(
        &self,
        original_directory: &Path,
        spec: &PackageSpec,
    ) -> StencilResult<Option<PathBuf>> {
        let prefix = match self.options.strategy {
            InstallStrategy::TempPrefix => Some(temp_install_dir(original_directory)),
            InstallStrategy::Global => None,
        };

        let packages_root = match &prefix {
            Some(dir) => dir.join("node_modules"),
            None => match self.global_install_path()? {
                Some(root) => root,
                None => {
                    warn!(
                        manager = %self.options.package_manager,
                        "package manager reported no global directory"
                    );
                    return Ok(None);
                }
            },
        };

        let candidate = spec.install_dir(&packages_root);
        if self.find_by_path(&candidate) {
            return Ok(Some(candidate));
        }

        if self.options.offline {
            self.progress("Template not installed. Skipping install.");
            info!(package = %spec, "offline; not installing");
            return Ok(None);
        }

        self.progress("Template not found. Attempting to install...");

        let location = match &prefix {
            Some(dir) => InstallLocation::Prefix(dir),
            None => InstallLocation::Global,
        };
        self.install_template(spec, location)?;

        if self.find_by_path(&candidate) {
            Ok(Some(candidate))
        } else {
            warn!(
                package = %spec,
                expected = %candidate.display(),
                "install succeeded but template is still missing"
            );
            Ok(None)
        }
    }

    fn find_by_path(&self, path: &Path) -> bool {
        self.progress("Searching for template...");

        let found = self.filesystem.exists(path);
        if found {
            self.progress(&format!(
                "Template found! Using files from {}",
                path.display()
            ));
        }
        found
    }

    /// Run one command; any non-zero exit is a failure.
    fn run_command(&self, command: &CommandLine, stdio: Stdio) -> StencilResult<CommandOutcome> {
        self.progress(&format!("Executing command `{command}`"));

        let exit = self.runner.run(command, stdio)?;
        if !exit.success() {
            warn!(command = %command, status = ?exit.status, "command failed");
            return Err(ApplicationError::CommandFailed {
                command: command.to_string(),
                status: exit.status,
            }
            .into());
        }

        Ok(CommandOutcome::from_stdout(&exit.stdout))
    }

    fn progress(&self, message: &str) {
        debug!(message, "progress");
        self.reporter.report(message);
    }
}

/// `own_path/template`.
pub fn default_template_dir(own_path: &Path) -> PathBuf {
    own_path.join(DEFAULT_TEMPLATE_DIR)
}

/// `original_directory/temp`.
pub fn temp_install_dir(original_directory: &Path) -> PathBuf {
    resolve_against(original_directory, Path::new(TEMP_INSTALL_DIR))
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::application::ports::{MockCommandRunner, MockFilesystem, MockProgressReporter};
    use crate::domain::ProcessExit;
    use crate::error::StencilError;

    const OWN: &str = "/opt/stencil";
    const CWD: &str = "/work/my-app";

    fn quiet_reporter() -> Box<MockProgressReporter> {
        let mut reporter = MockProgressReporter::new();
        reporter.expect_report().return_const(());
        Box::new(reporter)
    }

    fn resolver(
        fs: MockFilesystem,
        runner: MockCommandRunner,
        options: InstallOptions,
    ) -> TemplateResolver {
        TemplateResolver::new(Box::new(fs), Box::new(runner), quiet_reporter(), options)
    }

    /// Filesystem where `path` is missing until the first install has run.
    fn appears_after_first_check(path: &'static str) -> MockFilesystem {
        let checks = Arc::new(AtomicUsize::new(0));
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(move |p: &Path| p == Path::new(path))
            .returning(move |_| checks.fetch_add(1, Ordering::SeqCst) > 0);
        fs
    }

    // ── template_path ─────────────────────────────────────────────────────

    #[test]
    fn empty_template_uses_bundled_default_without_io() {
        // No expectations: any filesystem or runner call panics.
        let resolver = resolver(
            MockFilesystem::new(),
            MockCommandRunner::new(),
            InstallOptions::default(),
        );

        let path = resolver
            .template_path("", "my-app", Path::new(OWN), Path::new(CWD))
            .unwrap();

        assert_eq!(path, Some(PathBuf::from("/opt/stencil/template")));
    }

    #[test]
    fn progress_names_app_and_template() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);

        let messages = Arc::new(std::sync::Mutex::new(Vec::<String>::new()));
        let sink = Arc::clone(&messages);
        let mut reporter = MockProgressReporter::new();
        reporter
            .expect_report()
            .returning(move |m| sink.lock().unwrap().push(m.to_string()));

        let resolver = TemplateResolver::new(
            Box::new(fs),
            Box::new(MockCommandRunner::new()),
            Box::new(reporter),
            InstallOptions::default(),
        );
        resolver
            .template_path("./tpl", "my-app", Path::new(OWN), Path::new(CWD))
            .unwrap();

        let messages = messages.lock().unwrap();
        assert_eq!(messages.first().map(String::as_str), Some("Finding template ./tpl..."));
        assert_eq!(
            messages.last().map(String::as_str),
            Some("Creating my-app using template ./tpl...")
        );
    }

    #[test]
    #[cfg(unix)]
    fn missing_local_path_is_absent_and_never_installs() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(|p: &Path| p == Path::new("/work/templates/web"))
            .times(1)
            .return_const(false);

        let resolver = resolver(fs, MockCommandRunner::new(), InstallOptions::default());

        let path = resolver
            .template_path("../templates/web", "my-app", Path::new(OWN), Path::new(CWD))
            .unwrap();

        assert_eq!(path, None);
    }

    #[test]
    #[cfg(unix)]
    fn existing_local_path_resolves_against_original_directory() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(|p: &Path| p == Path::new("/work/my-app/templates/web"))
            .return_const(true);

        let resolver = resolver(fs, MockCommandRunner::new(), InstallOptions::default());

        let path = resolver
            .find_or_install(Path::new(CWD), "./templates/web")
            .unwrap();

        assert_eq!(path, Some(PathBuf::from("/work/my-app/templates/web")));
    }

    // ── packages: temp-prefix ─────────────────────────────────────────────

    #[test]
    #[cfg(unix)]
    fn package_already_in_temp_is_reused() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(|p: &Path| p == Path::new("/work/my-app/temp/node_modules/cra-template"))
            .times(1)
            .return_const(true);

        let resolver = resolver(fs, MockCommandRunner::new(), InstallOptions::default());

        let path = resolver
            .template_path("cra-template", "my-app", Path::new(OWN), Path::new(CWD))
            .unwrap();

        assert_eq!(
            path,
            Some(PathBuf::from("/work/my-app/temp/node_modules/cra-template"))
        );
    }

    #[test]
    #[cfg(unix)]
    fn missing_package_is_installed_into_temp_prefix() {
        let fs = appears_after_first_check("/work/my-app/temp/node_modules/@acme/tpl");

        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|cmd: &CommandLine, stdio: &Stdio| {
                cmd.to_string() == "npm install --prefix /work/my-app/temp --verbose @acme/tpl@2"
                    && *stdio == Stdio::Inherit
            })
            .times(1)
            .returning(|_, _| Ok(ProcessExit::new(Some(0), "")));

        let options = InstallOptions::default().verbose(true);
        let resolver = resolver(fs, runner, options);

        let path = resolver
            .find_or_install(Path::new(CWD), "@acme/tpl@2")
            .unwrap();

        assert_eq!(
            path,
            Some(PathBuf::from("/work/my-app/temp/node_modules/@acme/tpl"))
        );
    }

    #[test]
    #[cfg(unix)]
    fn offline_lookup_never_installs() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(|p: &Path| p == Path::new("/work/my-app/temp/node_modules/cra-template"))
            .times(1)
            .return_const(false);

        // No runner expectations: an install attempt panics.
        let options = InstallOptions::default().offline(true);
        let resolver = resolver(fs, MockCommandRunner::new(), options);

        let path = resolver
            .find_or_install(Path::new(CWD), "cra-template")
            .unwrap();

        assert_eq!(path, None);
    }

    #[test]
    fn only_package_installs_into_temp_use_the_temp_dir() {
        let temp_prefix = resolver(
            MockFilesystem::new(),
            MockCommandRunner::new(),
            InstallOptions::default(),
        );
        assert!(temp_prefix.uses_temp_dir("cra-template"));
        assert!(temp_prefix.uses_temp_dir("@acme/tpl@2"));
        assert!(!temp_prefix.uses_temp_dir(""));
        assert!(!temp_prefix.uses_temp_dir("./tpl"));
        assert!(!temp_prefix.uses_temp_dir("@acme"));

        let global = resolver(
            MockFilesystem::new(),
            MockCommandRunner::new(),
            InstallOptions::new(PackageManager::Npm, InstallStrategy::Global),
        );
        assert!(!global.uses_temp_dir("cra-template"));

        let offline = resolver(
            MockFilesystem::new(),
            MockCommandRunner::new(),
            InstallOptions::default().offline(true),
        );
        assert!(!offline.uses_temp_dir("cra-template"));
    }

    #[test]
    #[cfg(unix)]
    fn yarn_installs_with_global_folder() {
        let fs = appears_after_first_check("/work/my-app/temp/node_modules/cra-template");

        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|cmd: &CommandLine, _: &Stdio| {
                cmd.program == "yarnpkg"
                    && cmd.args
                        == [
                            "global",
                            "add",
                            "cra-template",
                            "--global-folder",
                            "/work/my-app/temp",
                        ]
            })
            .times(1)
            .returning(|_, _| Ok(ProcessExit::new(Some(0), "")));

        let options = InstallOptions::new(PackageManager::Yarn, InstallStrategy::TempPrefix);
        let resolver = resolver(fs, runner, options);

        assert!(
            resolver
                .find_or_install(Path::new(CWD), "cra-template")
                .unwrap()
                .is_some()
        );
    }

    #[test]
    fn failed_install_is_an_error_and_not_retried() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);

        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .times(1)
            .returning(|_, _| Ok(ProcessExit::new(Some(1), "")));

        let resolver = resolver(fs, runner, InstallOptions::default());

        let err = resolver
            .template_path("cra-template", "my-app", Path::new(OWN), Path::new(CWD))
            .unwrap_err();

        match &err {
            StencilError::Application(ApplicationError::CommandFailed { command, status }) => {
                assert!(command.starts_with("npm install --prefix"));
                assert!(command.ends_with("cra-template"));
                assert_eq!(*status, Some(1));
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
        assert!(err.to_string().contains("` failed"));
    }

    #[test]
    fn install_that_leaves_nothing_behind_is_absent() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().times(2).return_const(false);

        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .times(1)
            .returning(|_, _| Ok(ProcessExit::new(Some(0), "added 1 package")));

        let resolver = resolver(fs, runner, InstallOptions::default());

        assert_eq!(
            resolver
                .find_or_install(Path::new(CWD), "cra-template")
                .unwrap(),
            None
        );
    }

    #[test]
    fn invalid_package_spec_is_rejected_before_any_io() {
        let resolver = resolver(
            MockFilesystem::new(),
            MockCommandRunner::new(),
            InstallOptions::default(),
        );

        assert!(matches!(
            resolver.template_path("@scope-only", "my-app", Path::new(OWN), Path::new(CWD)),
            Err(StencilError::Domain(_))
        ));
    }

    // ── packages: global ──────────────────────────────────────────────────

    #[test]
    #[cfg(unix)]
    fn global_strategy_reuses_globally_installed_package() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(|p: &Path| p == Path::new("/usr/lib/node_modules/cra-template"))
            .times(1)
            .return_const(true);

        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|cmd: &CommandLine, stdio: &Stdio| {
                cmd.to_string() == "npm root --global" && *stdio == Stdio::Capture
            })
            .times(1)
            .returning(|_, _| Ok(ProcessExit::new(Some(0), "/usr/lib/node_modules\n")));

        let options = InstallOptions::new(PackageManager::Npm, InstallStrategy::Global);
        let resolver = resolver(fs, runner, options);

        assert_eq!(
            resolver
                .find_or_install(Path::new(CWD), "cra-template")
                .unwrap(),
            Some(PathBuf::from("/usr/lib/node_modules/cra-template"))
        );
    }

    #[test]
    #[cfg(unix)]
    fn global_strategy_installs_with_global_flag() {
        let fs = appears_after_first_check("/home/u/.yarn/global/node_modules/cra-template");

        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|cmd: &CommandLine, _: &Stdio| cmd.to_string() == "yarnpkg global dir")
            .times(1)
            .returning(|_, _| Ok(ProcessExit::new(Some(0), "/home/u/.yarn/global")));
        runner
            .expect_run()
            .withf(|cmd: &CommandLine, _: &Stdio| {
                cmd.to_string() == "yarnpkg global add cra-template"
            })
            .times(1)
            .returning(|_, _| Ok(ProcessExit::new(Some(0), "")));

        let options = InstallOptions::new(PackageManager::Yarn, InstallStrategy::Global);
        let resolver = resolver(fs, runner, options);

        assert_eq!(
            resolver
                .find_or_install(Path::new(CWD), "cra-template")
                .unwrap(),
            Some(PathBuf::from(
                "/home/u/.yarn/global/node_modules/cra-template"
            ))
        );
    }

    #[test]
    fn global_directory_query_without_output_is_absent() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .times(1)
            .returning(|_, _| Ok(ProcessExit::new(Some(0), "   ")));

        let options = InstallOptions::new(PackageManager::Npm, InstallStrategy::Global);
        let resolver = resolver(MockFilesystem::new(), runner, options);

        assert_eq!(resolver.global_install_path().unwrap(), None);
        // The lookup gives up without touching the filesystem.
    }

    #[test]
    fn runner_spawn_failure_propagates() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(1).returning(|cmd, _| {
            Err(ApplicationError::CommandSpawn {
                command: cmd.to_string(),
                reason: "No such file or directory".into(),
            }
            .into())
        });

        let options = InstallOptions::new(PackageManager::Npm, InstallStrategy::Global);
        let resolver = resolver(MockFilesystem::new(), runner, options);

        let err = resolver.global_install_path().unwrap_err();
        assert_eq!(err.failed_command(), Some("npm root --global"));
    }

    // ── template_config ───────────────────────────────────────────────────

    #[test]
    fn missing_template_config_is_absent() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().times(1).return_const(false);

        let resolver = resolver(fs, MockCommandRunner::new(), InstallOptions::default());

        assert_eq!(
            resolver
                .template_config(Some(Path::new("/t")), Path::new(OWN))
                .unwrap(),
            None
        );
    }

    #[test]
    #[cfg(unix)]
    fn template_config_is_parsed() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(|p: &Path| p == Path::new("/t/.template.dependencies.json"))
            .return_const(true);
        fs.expect_read_to_string()
            .returning(|_| Ok(r#"{"dependencies":{"left-pad":"^1.0.0"}}"#.to_string()));

        let resolver = resolver(fs, MockCommandRunner::new(), InstallOptions::default());

        let config = resolver
            .template_config(Some(Path::new("/t")), Path::new(OWN))
            .unwrap()
            .unwrap();

        let deps = config.dependencies.unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps["left-pad"], "^1.0.0");
    }

    #[test]
    #[cfg(unix)]
    fn template_config_falls_back_to_bundled_template() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(|p: &Path| p == Path::new("/opt/stencil/template/.template.dependencies.json"))
            .times(1)
            .return_const(false);

        let resolver = resolver(fs, MockCommandRunner::new(), InstallOptions::default());

        assert!(resolver.template_config(None, Path::new(OWN)).unwrap().is_none());
    }

    #[test]
    fn malformed_template_config_reports_its_path() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_read_to_string()
            .returning(|_| Ok("{ nope".to_string()));

        let resolver = resolver(fs, MockCommandRunner::new(), InstallOptions::default());

        let err = resolver
            .template_config(Some(Path::new("t")), Path::new(OWN))
            .unwrap_err();
        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::InvalidTemplateConfig { ref path, .. })
                if path.ends_with(TEMPLATE_CONFIG_FILE)
        ));
    }

    // ── cleanup ───────────────────────────────────────────────────────────

    #[test]
    fn cleanup_without_temp_dir_is_a_no_op() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_remove_dir_all().never();

        let resolver = resolver(fs, MockCommandRunner::new(), InstallOptions::default());

        assert!(resolver.cleanup(Path::new(CWD)).is_ok());
    }

    #[test]
    #[cfg(unix)]
    fn cleanup_removes_temp_dir() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_remove_dir_all()
            .withf(|p: &Path| p == Path::new("/work/my-app/temp"))
            .times(1)
            .returning(|_| Ok(()));

        let resolver = resolver(fs, MockCommandRunner::new(), InstallOptions::default());

        resolver.cleanup(Path::new(CWD)).unwrap();
    }
}
