//! Unified error handling for Stencil Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Stencil Core operations.
///
/// "Not found" is never an error in this crate: lookups that come up empty
/// return `Ok(None)`. Everything that reaches this type is a real failure.
#[derive(Debug, Error, Clone)]
pub enum StencilError {
    /// Errors from the domain layer (malformed references, bad manifests).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (process and filesystem failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl StencilError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in Stencil".into(),
                "Please report this issue at: https://github.com/cosecruz/stencil/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The failed command line, if this error came from an external process.
    pub fn failed_command(&self) -> Option<&str> {
        match self {
            Self::Application(ApplicationError::CommandFailed { command, .. })
            | Self::Application(ApplicationError::CommandSpawn { command, .. }) => Some(command),
            _ => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    ExternalCommand,
    Internal,
}

/// Convenient result type alias.
pub type StencilResult<T> = Result<T, StencilError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> StencilResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> StencilResult<T> {
        self.map_err(|e| StencilError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_command_is_exposed() {
        let err: StencilError = ApplicationError::CommandFailed {
            command: "npm install --global cra-template".into(),
            status: Some(1),
        }
        .into();

        assert_eq!(err.failed_command(), Some("npm install --global cra-template"));
        assert_eq!(err.category(), ErrorCategory::ExternalCommand);
        assert!(err.to_string().contains("`npm install --global cra-template` failed"));
    }

    #[test]
    fn context_wraps_as_internal() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::other("boom"));
        let err = result.context("reading manifest").unwrap_err();

        assert!(matches!(err, StencilError::Internal { ref message } if message.contains("reading manifest: boom")));
        assert_eq!(err.category(), ErrorCategory::Internal);
    }
}
