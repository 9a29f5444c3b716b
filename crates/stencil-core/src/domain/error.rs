// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid package spec '{spec}': {reason}")]
    InvalidPackageSpec { spec: String, reason: String },

    #[error("Unknown package manager: {0}")]
    UnknownPackageManager(String),

    #[error("Unknown install strategy: {0}")]
    UnknownInstallStrategy(String),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Failed to serialize manifest: {0}")]
    Serialization(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidPackageSpec { spec, .. } => vec![
                format!("'{}' is neither a path nor a valid package name", spec),
                "Local templates must start with './', '../' or be absolute".into(),
                "Packages look like: cra-template, @scope/template, name@1.2.0".into(),
            ],
            Self::UnknownPackageManager(name) => vec![
                format!("'{}' is not a supported package manager", name),
                "Supported: npm, yarn".into(),
            ],
            Self::UnknownInstallStrategy(name) => vec![
                format!("'{}' is not a supported install strategy", name),
                "Supported: temp-prefix, global".into(),
            ],
            Self::InvalidManifest(_) => vec![
                "The manifest must be a JSON object".into(),
                "Check the file for syntax errors".into(),
            ],
            Self::Serialization(_) => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Serialization(_) => ErrorCategory::Internal,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
