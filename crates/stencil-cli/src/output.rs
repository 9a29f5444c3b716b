//! Output management and formatting.
//!
//! Results go to stdout; progress lines from the resolver go to stderr so
//! that `stencil resolve` can be captured by a script.

use std::io;

use console::Term;
use owo_colors::OwoColorize;
use stencil_core::application::ports::ProgressReporter;

use crate::cli::GlobalArgs;
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
#[derive(Debug, Clone)]
pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    term: Term,
    progress: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        Self {
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color,
            term: Term::stdout(),
            progress: Term::stderr(),
        }
    }
    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// The command's result (a path, a JSON document). Never suppressed.
    pub fn data(&self, msg: &str) -> io::Result<()> {
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }
}

impl ProgressReporter for OutputManager {
    fn report(&self, message: &str) {
        if self.quiet {
            return;
        }
        let line = if self.no_color {
            message.to_owned()
        } else {
            message.dimmed().to_string()
        };
        // A closed stderr must not abort an install.
        let _ = self.progress.write_line(&line);
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
