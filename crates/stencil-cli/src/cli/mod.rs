//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use stencil_core::domain::InstallStrategy;

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stencil",
    bin_name = "stencil",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Resolve, install and apply app templates",
    long_about = "Stencil finds an app template (bundled, on disk, or as an npm \
                  package), installs it when needed, and merges its declared \
                  dependencies and scripts into your package.json.",
    after_help = "EXAMPLES:\n\
        \x20 stencil resolve ./my-template\n\
        \x20 stencil resolve cra-template-typescript --use-yarn\n\
        \x20 stencil configure package.json --template cra-template\n\
        \x20 stencil cleanup",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve a template reference to a directory.
    #[command(
        visible_alias = "r",
        about = "Print the directory a template resolves to",
        after_help = "EXAMPLES:\n\
            \x20 stencil resolve ''                 # bundled default\n\
            \x20 stencil resolve ../shared/template\n\
            \x20 stencil resolve @acme/template@^2 --strategy global"
    )]
    Resolve(ResolveArgs),

    /// Show a template's `.template.dependencies.json`.
    #[command(
        about = "Print a template's declared dependencies",
        after_help = "EXAMPLES:\n\
            \x20 stencil show-config\n\
            \x20 stencil show-config ./my-template"
    )]
    ShowConfig(ShowConfigArgs),

    /// Merge a template into an app manifest.
    #[command(
        about = "Merge a template's dependencies into package.json",
        after_help = "EXAMPLES:\n\
            \x20 stencil configure package.json\n\
            \x20 stencil configure package.json --template cra-template --dry-run\n\
            \x20 stencil configure app/package.json --template ./tpl --keep-temp"
    )]
    Configure(ConfigureArgs),

    /// Remove the temporary install directory.
    #[command(
        about = "Remove <DIR>/temp left behind by installs",
        after_help = "EXAMPLES:\n\
            \x20 stencil cleanup\n\
            \x20 stencil cleanup --dir ../my-app"
    )]
    Cleanup(CleanupArgs),

    /// Initialise a Stencil configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 stencil init           # default location\n\
            \x20 stencil init --force   # overwrite"
    )]
    Init(InitArgs),

    /// Inspect the Stencil configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stencil config get resolver.strategy\n\
            \x20 stencil config list\n\
            \x20 stencil config path"
    )]
    Config(ConfigCommands),
}

// ── shared resolver flags ─────────────────────────────────────────────────────

/// Flags that override the `[resolver]` and `[templates]` config sections.
#[derive(Debug, Clone, Default, Args)]
pub struct ResolverArgs {
    /// Install with yarn instead of npm.
    #[arg(long = "use-yarn", help = "Use yarn (yarnpkg) instead of npm")]
    pub use_yarn: bool,

    /// Where package templates are installed.
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        value_enum,
        help = "Install strategy for package templates"
    )]
    pub strategy: Option<Strategy>,

    /// Root holding the bundled `template/` directory.
    #[arg(
        long = "own-path",
        value_name = "DIR",
        help = "Directory containing the bundled template (default: next to the executable)"
    )]
    pub own_path: Option<PathBuf>,

    /// Ask npm for verbose install output.
    #[arg(long = "verbose-install", help = "Pass --verbose to npm install")]
    pub verbose_install: bool,
}

/// Install strategy, as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Install into `<DIR>/temp`, removed after use.
    #[value(name = "temp-prefix", alias = "temp")]
    TempPrefix,
    /// Use the package manager's global directory.
    Global,
}

impl From<Strategy> for InstallStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::TempPrefix => InstallStrategy::TempPrefix,
            Strategy::Global => InstallStrategy::Global,
        }
    }
}

// ── resolve ───────────────────────────────────────────────────────────────────

/// Arguments for `stencil resolve`.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Template reference: empty for the bundled default, a path starting
    /// with `/`, `.` or `..`, or an npm package spec.
    #[arg(value_name = "TEMPLATE", help = "Template path or package")]
    pub template: String,

    /// App name used in progress messages.
    #[arg(
        long = "app-name",
        value_name = "NAME",
        help = "App name (default: name of --dir)"
    )]
    pub app_name: Option<String>,

    /// Directory relative references resolve against.
    #[arg(
        short = 'd',
        long = "dir",
        value_name = "DIR",
        help = "Original directory (default: current directory)"
    )]
    pub dir: Option<PathBuf>,

    #[command(flatten)]
    pub resolver: ResolverArgs,
}

// ── show-config ───────────────────────────────────────────────────────────────

/// Arguments for `stencil show-config`.
#[derive(Debug, Args)]
pub struct ShowConfigArgs {
    /// Template reference; the bundled default when omitted.
    #[arg(value_name = "TEMPLATE", help = "Template path or package")]
    pub template: Option<String>,

    #[arg(
        short = 'd',
        long = "dir",
        value_name = "DIR",
        help = "Original directory (default: current directory)"
    )]
    pub dir: Option<PathBuf>,

    /// Leave `<DIR>/temp` in place afterwards.
    #[arg(long = "keep-temp", help = "Do not remove the temporary install directory")]
    pub keep_temp: bool,

    #[command(flatten)]
    pub resolver: ResolverArgs,
}

// ── configure ─────────────────────────────────────────────────────────────────

/// Arguments for `stencil configure`.
#[derive(Debug, Args)]
pub struct ConfigureArgs {
    /// The app's `package.json`.
    #[arg(value_name = "PACKAGE_JSON", help = "Path to the app's package.json")]
    pub package_json: PathBuf,

    /// Template reference; the bundled default when omitted.
    #[arg(
        short = 't',
        long = "template",
        value_name = "TEMPLATE",
        default_value = "",
        hide_default_value = true,
        help = "Template path or package (default: bundled template)"
    )]
    pub template: String,

    #[arg(
        short = 'd',
        long = "dir",
        value_name = "DIR",
        help = "Original directory (default: current directory)"
    )]
    pub dir: Option<PathBuf>,

    /// Leave `<DIR>/temp` in place afterwards.
    #[arg(long = "keep-temp", help = "Do not remove the temporary install directory")]
    pub keep_temp: bool,

    /// Print the merged manifest instead of writing it.
    #[arg(long = "dry-run", help = "Print the merged package.json without writing it")]
    pub dry_run: bool,

    #[command(flatten)]
    pub resolver: ResolverArgs,
}

// ── cleanup ───────────────────────────────────────────────────────────────────

/// Arguments for `stencil cleanup`.
#[derive(Debug, Args)]
pub struct CleanupArgs {
    #[arg(
        short = 'd',
        long = "dir",
        value_name = "DIR",
        help = "Original directory (default: current directory)"
    )]
    pub dir: Option<PathBuf>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `stencil config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `resolver.strategy`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
