//! Comprehensive error handling for Stencil CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Proper error chaining
//! - Exit code mapping

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use stencil_core::error::StencilError;

// Re-export so callers only need `use crate::error::*`.
pub use stencil_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Comprehensive CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input (validation failed).
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The template reference did not resolve to an existing directory.
    #[error("Template not found: {template}")]
    TemplateNotFound { template: String },

    /// The app manifest to configure does not exist.
    #[error("No package.json at {path}")]
    ManifestNotFound { path: PathBuf },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `stencil-core`.
    #[error("{0}")]
    Core(#[from] StencilError),

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Rendering a JSON document for output failed.
    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {}", message),
                "Use --help for usage information".into(),
            ],

            Self::TemplateNotFound { template } => vec![
                format!("'{}' did not resolve to a directory", template),
                "Paths must start with '/', './' or '../' and are relative to --dir".into(),
                "Anything else is installed as an npm package; check the name".into(),
                "Leave the template empty to use the bundled default".into(),
            ],

            Self::ManifestNotFound { path } => vec![
                format!("Create {} first (npm init -y)", path.display()),
                "Or pass the correct path to 'stencil configure'".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                "Check the file printed by 'stencil config path'".into(),
                "Use 'stencil init --force' to write a fresh default config".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],

            Self::Json(_) => vec!["This appears to be a bug in Stencil".into()],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::ManifestNotFound { .. } => ErrorCategory::NotFound,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::ExternalCommand | CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::Json(_) => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));

        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {}\n", suggestion));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {}\n", self));

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert I/O failures into [`CliError`] at call-sites
/// with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}
