//! Application layer errors.
//!
//! These errors represent failures while talking to the outside world.
//! Malformed input is `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The package manager ran and exited unsuccessfully.
    #[error("`{command}` failed")]
    CommandFailed {
        command: String,
        status: Option<i32>,
    },

    /// The package manager binary could not be started at all.
    #[error("`{command}` could not be started: {reason}")]
    CommandSpawn { command: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// `.template.dependencies.json` exists but cannot be used.
    #[error("Invalid template config at {path}: {reason}")]
    InvalidTemplateConfig { path: PathBuf, reason: String },

    /// Shared state guarding an adapter was poisoned.
    #[error("Adapter state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::CommandFailed { command, status } => {
                let mut out = vec![format!("Command failed: {}", command)];
                if let Some(code) = status {
                    out.push(format!("It exited with status {}", code));
                }
                out.push("Check the package manager output above for details".into());
                out.push("Verify the template name and your registry access".into());
                out
            }
            Self::CommandSpawn { command, .. } => vec![
                format!("Could not run: {}", command),
                "Ensure npm (or yarn, with --use-yarn) is installed and in your PATH".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have read/write permissions".into(),
            ],
            Self::InvalidTemplateConfig { path, .. } => vec![
                format!("Fix or remove {}", path.display()),
                "It must be a JSON object with optional dependencies, devDependencies, scripts and lint-staged objects".into(),
            ],
            Self::LockPoisoned => vec!["Try again".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CommandFailed { .. } | Self::CommandSpawn { .. } => {
                ErrorCategory::ExternalCommand
            }
            Self::InvalidTemplateConfig { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. } | Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
