//! Package managers, install strategies and the command lines they produce.
//!
//! # Design
//!
//! The exact argument templates live here and nowhere else. Adapters only
//! know how to run a [`CommandLine`]; the application service only knows
//! which command it wants.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, reference::PackageSpec};

// ── PackageManager ──────────────────────────────────────────────────────────

/// The external binary used to install templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
}

impl PackageManager {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
        }
    }

    /// Executable name. Yarn is invoked as `yarnpkg` to avoid the Hadoop
    /// `yarn` binary on some systems.
    pub const fn program(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarnpkg",
        }
    }

    /// Command that installs `spec` at `location`.
    ///
    /// | Manager | Prefix(dir)                                | Global                         |
    /// |---------|--------------------------------------------|--------------------------------|
    /// | npm     | `install --prefix <dir> [--verbose] <spec>` | `install --global [--verbose] <spec>` |
    /// | yarn    | `global add <spec> --global-folder <dir>`   | `global add <spec>`            |
    pub fn install_command(
        &self,
        spec: &PackageSpec,
        location: InstallLocation<'_>,
        verbose: bool,
    ) -> CommandLine {
        let cmd = CommandLine::new(self.program());
        match (self, location) {
            (Self::Npm, InstallLocation::Prefix(dir)) => cmd
                .arg("install")
                .arg("--prefix")
                .arg(dir.display().to_string())
                .arg_if(verbose, "--verbose")
                .arg(spec.as_str()),
            (Self::Npm, InstallLocation::Global) => cmd
                .arg("install")
                .arg("--global")
                .arg_if(verbose, "--verbose")
                .arg(spec.as_str()),
            (Self::Yarn, InstallLocation::Prefix(dir)) => cmd
                .arg("global")
                .arg("add")
                .arg(spec.as_str())
                .arg("--global-folder")
                .arg(dir.display().to_string()),
            (Self::Yarn, InstallLocation::Global) => {
                cmd.arg("global").arg("add").arg(spec.as_str())
            }
        }
    }

    /// Command that prints the global package directory.
    pub fn global_dir_command(&self) -> CommandLine {
        match self {
            Self::Npm => CommandLine::new(self.program()).arg("root").arg("--global"),
            Self::Yarn => CommandLine::new(self.program()).arg("global").arg("dir"),
        }
    }

    /// Directory holding globally installed packages, given the output of
    /// [`Self::global_dir_command`].
    ///
    /// `npm root -g` already points at `node_modules`; `yarn global dir`
    /// points at its parent.
    pub fn global_packages_root(&self, reported: &Path) -> PathBuf {
        match self {
            Self::Npm => reported.to_path_buf(),
            Self::Yarn => reported.join("node_modules"),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "yarn" | "yarnpkg" => Ok(Self::Yarn),
            other => Err(DomainError::UnknownPackageManager(other.to_string())),
        }
    }
}

// ── InstallStrategy ─────────────────────────────────────────────────────────

/// Where package templates are looked up and installed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstallStrategy {
    /// `<original dir>/temp/node_modules/<name>`, removed by cleanup.
    #[default]
    TempPrefix,
    /// The package manager's own global directory.
    Global,
}

impl InstallStrategy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TempPrefix => "temp-prefix",
            Self::Global => "global",
        }
    }
}

impl fmt::Display for InstallStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstallStrategy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "temp-prefix" | "temp" | "prefix" => Ok(Self::TempPrefix),
            "global" => Ok(Self::Global),
            other => Err(DomainError::UnknownInstallStrategy(other.to_string())),
        }
    }
}

/// Concrete install target handed to [`PackageManager::install_command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallLocation<'a> {
    Prefix(&'a Path),
    Global,
}

// ── CommandLine ─────────────────────────────────────────────────────────────

/// A program plus arguments. Never passed through a shell by core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    fn arg_if(self, cond: bool, arg: &str) -> Self {
        if cond { self.arg(arg) } else { self }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How the child's standard streams are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stdio {
    /// Child shares the terminal; progress is visible to the user.
    Inherit,
    /// Stdout is captured and returned; stderr still goes to the terminal.
    Capture,
}

/// Raw exit information reported by a [`CommandLine`] run.
///
/// `status` is `None` when the child was killed by a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessExit {
    pub status: Option<i32>,
    pub stdout: String,
}

impl ProcessExit {
    pub fn new(status: Option<i32>, stdout: impl Into<String>) -> Self {
        Self {
            status,
            stdout: stdout.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Result of a command that exited with status 0.
///
/// Non-zero exits never produce an outcome, they are errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Exited cleanly, printed nothing (or nothing was captured).
    Completed,
    /// Exited cleanly with this trimmed stdout.
    Output(String),
}

impl CommandOutcome {
    pub fn from_stdout(stdout: &str) -> Self {
        let trimmed = stdout.trim();
        if trimmed.is_empty() {
            Self::Completed
        } else {
            Self::Output(trimmed.to_string())
        }
    }

    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Completed => None,
            Self::Output(text) => Some(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(raw: &str) -> PackageSpec {
        PackageSpec::parse(raw).unwrap()
    }

    #[test]
    fn npm_prefix_install_command() {
        let cmd = PackageManager::Npm.install_command(
            &spec("cra-template"),
            InstallLocation::Prefix(Path::new("/work/temp")),
            false,
        );
        assert_eq!(cmd.to_string(), "npm install --prefix /work/temp cra-template");
    }

    #[test]
    fn npm_verbose_flag_precedes_package() {
        let cmd = PackageManager::Npm.install_command(
            &spec("cra-template@1.0.0"),
            InstallLocation::Global,
            true,
        );
        assert_eq!(cmd.args, ["install", "--global", "--verbose", "cra-template@1.0.0"]);
    }

    #[test]
    fn yarn_install_commands() {
        let prefix = PackageManager::Yarn.install_command(
            &spec("@acme/tpl"),
            InstallLocation::Prefix(Path::new("/work/temp")),
            true,
        );
        assert_eq!(
            prefix.to_string(),
            "yarnpkg global add @acme/tpl --global-folder /work/temp"
        );

        let global =
            PackageManager::Yarn.install_command(&spec("@acme/tpl"), InstallLocation::Global, false);
        assert_eq!(global.to_string(), "yarnpkg global add @acme/tpl");
    }

    #[test]
    fn global_dir_commands() {
        assert_eq!(PackageManager::Npm.global_dir_command().to_string(), "npm root --global");
        assert_eq!(PackageManager::Yarn.global_dir_command().to_string(), "yarnpkg global dir");
    }

    #[test]
    fn yarn_global_root_is_nested() {
        assert_eq!(
            PackageManager::Yarn.global_packages_root(Path::new("/home/u/.yarn/global")),
            PathBuf::from("/home/u/.yarn/global/node_modules")
        );
        assert_eq!(
            PackageManager::Npm.global_packages_root(Path::new("/usr/lib/node_modules")),
            PathBuf::from("/usr/lib/node_modules")
        );
    }

    #[test]
    fn parses_names() {
        assert_eq!("NPM".parse::<PackageManager>().unwrap(), PackageManager::Npm);
        assert_eq!("yarnpkg".parse::<PackageManager>().unwrap(), PackageManager::Yarn);
        assert!("pnpm".parse::<PackageManager>().is_err());

        assert_eq!("global".parse::<InstallStrategy>().unwrap(), InstallStrategy::Global);
        assert_eq!(
            "temp-prefix".parse::<InstallStrategy>().unwrap(),
            InstallStrategy::TempPrefix
        );
        assert!("cache".parse::<InstallStrategy>().is_err());
    }

    #[test]
    fn outcome_trims_stdout() {
        assert_eq!(CommandOutcome::from_stdout("  \n"), CommandOutcome::Completed);
        assert_eq!(
            CommandOutcome::from_stdout("/usr/lib/node_modules\n").output(),
            Some("/usr/lib/node_modules")
        );
    }
}
