//! Flags accepted by every subcommand, and what they mean for logging.

use std::path::PathBuf;

use clap::{ArgAction, Args, builder::FalseyValueParser};

/// Verbosity, colour and config-file flags shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Log more: `-v` info, `-vv` debug, `-vvv` trace.
    ///
    /// Also adds the error chain to failure messages.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors and requested data.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Plain output without ANSI colours.
    ///
    /// `NO_COLOR` set to anything but an explicit false (`0`, `false`,
    /// `no`, `off`, empty) has the same effect.
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Read settings from FILE instead of the user config file.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    /// Filter level for our crates. `--quiet` wins over `-v`.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Whether failures should print their full cause chain.
    pub fn detailed_errors(&self) -> bool {
        self.verbose > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn args(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            ..GlobalArgs::default()
        }
    }

    #[test]
    fn level_steps_up_with_verbosity() {
        assert_eq!(args(0, false).log_level(), "warn");
        assert_eq!(args(1, false).log_level(), "info");
        assert_eq!(args(2, false).log_level(), "debug");
        assert_eq!(args(3, false).log_level(), "trace");
        assert_eq!(args(10, false).log_level(), "trace");
    }

    #[test]
    fn quiet_overrides_verbose() {
        assert_eq!(args(3, true).log_level(), "error");
        assert!(!args(0, true).detailed_errors());
        assert!(args(1, false).detailed_errors());
    }

    #[test]
    fn flags_parse_after_the_subcommand() {
        let cli = Cli::parse_from(["stencil", "cleanup", "--no-color", "-vv", "-c", "s.toml"]);

        assert!(cli.global.no_color);
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.config, Some(PathBuf::from("s.toml")));
    }
}
