//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stencil-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{CommandLine, ProcessExit, Stdio};
use crate::error::StencilResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stencil_adapters::filesystem::LocalFilesystem` (production)
/// - `stencil_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> StencilResult<String>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StencilResult<()>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> StencilResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> StencilResult<()>;
}

/// Port for running external programs synchronously.
///
/// Implemented by:
/// - `stencil_adapters::process::ProcessRunner` (production)
/// - `stencil_adapters::process::ScriptedRunner` (testing)
///
/// ## Design Notes
///
/// - Blocks until the child exits; there is no timeout
/// - A non-zero exit is *not* an error at this level, it is reported in
///   [`ProcessExit::status`]; only failing to start the program is
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &CommandLine, stdio: Stdio) -> StencilResult<ProcessExit>;
}

/// Port for human-readable progress lines.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressReporter: Send + Sync {
    fn report(&self, message: &str);
}
