//! # Stencil CLI
//!
//! Resolves app templates, installs them with npm or yarn when needed, and
//! merges their declared dependencies into `package.json`.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (defaults + file + env).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                 |
//! |------|-------------------------|
//! |  0   | Success                 |
//! |  1   | Internal / system error |
//! |  2   | User / input error      |
//! |  3   | Resource not found      |
//! |  4   | Configuration error     |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Load .env before anything else, including tracing init. A missing
    // .env is fine.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version arrive here too, with exit code 0.
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    let verbose = cli.global.detailed_errors();
    let no_color = cli.global.no_color;

    // ── 3. Load configuration ─────────────────────────────────────────────
    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            return handle_error(
                CliError::ConfigError {
                    message: format!("{e:#}"),
                    source: None,
                },
                verbose,
                no_color,
            );
        }
    };

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);
    let no_color = !output.supports_color();

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    match run(cli, config, output) {
        Ok(()) => {
            info!("Stencil completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose, no_color),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::Resolve(cmd) => commands::resolve::execute(cmd, config, output),
        Commands::ShowConfig(cmd) => commands::show_config::execute(cmd, config, output),
        Commands::Configure(cmd) => commands::configure::execute(cmd, config, output),
        Commands::Cleanup(cmd) => commands::cleanup::execute(cmd, config, output),
        Commands::Init(cmd) => commands::init::execute(cmd, output),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
    }
}

/// Translate a `CliError` into a user message and an exit code.
fn handle_error(err: CliError, verbose: bool, no_color: bool) -> ExitCode {
    err.log();

    let msg = if !no_color && std::io::stderr().is_terminal() {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
