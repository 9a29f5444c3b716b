//! Application layer for Stencil.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (TemplateResolver)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer sequences the domain layer and the ports. The
//! rules themselves (classification, command templates, merging) live in
//! `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{InstallOptions, TemplateResolver, default_template_dir, temp_install_dir};

pub use ports::{CommandRunner, Filesystem, ProgressReporter};

pub use error::ApplicationError;
