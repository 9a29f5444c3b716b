// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Stencil.
//!
//! This module contains pure logic with no I/O. Filesystem access and child
//! processes are reached only through the ports defined in the application
//! layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Few crates**: std, thiserror, and serde/serde_json for the manifests
//! - **Value types**: references, specs and commands are Clone + PartialEq
//!
pub mod error;
pub mod manifest;
pub mod package_manager;
pub mod reference;

pub use error::{DomainError, ErrorCategory};

pub use manifest::{
    AppPackage, JsonMap, TEMPLATE_CONFIG_FILE, TemplateConfig, configure_app_package,
};

pub use package_manager::{
    CommandLine, CommandOutcome, InstallLocation, InstallStrategy, PackageManager, ProcessExit,
    Stdio,
};

pub use reference::{
    PackageSpec, TemplateReference, is_path_reference, normalize_lexically, resolve_against,
};
