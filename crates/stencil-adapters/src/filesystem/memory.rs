//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use stencil_core::{
    application::{ApplicationError, ports::Filesystem},
    error::StencilResult,
};

/// In-memory filesystem for testing.
///
/// Cloning shares the underlying tree, so a test can hand one clone to a
/// resolver and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        let path = path.as_ref();
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                insert_ancestors(&mut inner.directories, parent);
            }
            inner.files.insert(path.to_path_buf(), content.to_string());
        }
        self
    }

    /// Seed a directory and its parents (testing helper).
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            insert_ancestors(&mut inner.directories, path.as_ref());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> StencilResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned.into())
    }

    fn write(&self) -> StencilResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned.into())
    }
}

fn insert_ancestors(directories: &mut HashSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn read_to_string(&self, path: &Path) -> StencilResult<String> {
        self.read()?.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "File does not exist".into(),
            }
            .into()
        })
    }

    fn create_dir_all(&self, path: &Path) -> StencilResult<()> {
        let mut inner = self.write()?;
        insert_ancestors(&mut inner.directories, path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> StencilResult<()> {
        let mut inner = self.write()?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> StencilResult<()> {
        let mut inner = self.write()?;

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));

        Ok(())
    }
}
