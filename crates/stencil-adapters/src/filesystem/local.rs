//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use stencil_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{StencilError, StencilResult},
};
use tracing::debug;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> StencilResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn create_dir_all(&self, path: &Path) -> StencilResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> StencilResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn remove_dir_all(&self, path: &Path) -> StencilResult<()> {
        match std::fs::remove_dir_all(path) {
            Ok(()) => Ok(()),
            // Someone else got there first.
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "directory already gone");
                Ok(())
            }
            Err(e) => Err(map_io_error(path, e, "remove directory")),
        }
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> StencilError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
