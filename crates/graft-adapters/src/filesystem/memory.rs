//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use graft_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{GraftError, GraftResult},
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can keep a handle after boxing one into a
/// service.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn is_dir(&self, path: &Path) -> bool {
        self.directories.contains(path)
    }

    fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.directories.contains(path)
    }

    fn add_dir_chain(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// Seed a file, creating its parent directories.
    pub fn seed_file(&self, path: impl AsRef<Path>, content: &str) -> GraftResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent)?;
        }
        self.write_file(path, content)
    }

    /// List all file paths, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> GraftResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| poisoned())
    }

    fn write(&self) -> GraftResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| poisoned())
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> GraftResult<()> {
        self.write()?.add_dir_chain(path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> GraftResult<()> {
        let mut inner = self.write()?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.is_dir(parent) {
                return Err(not_found(path, "parent directory does not exist"));
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> GraftResult<String> {
        self.read()?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path, "no such file"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.contains(path))
            .unwrap_or(false)
    }

    fn list_dir(&self, path: &Path) -> GraftResult<Vec<String>> {
        let inner = self.read()?;
        if !inner.is_dir(path) {
            return Err(not_found(path, "no such directory"));
        }

        let children: BTreeSet<String> = inner
            .files
            .keys()
            .chain(inner.directories.iter())
            .filter(|p| p.parent() == Some(path))
            .filter_map(|p| p.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();

        Ok(children.into_iter().collect())
    }

    fn rename(&self, from: &Path, to: &Path) -> GraftResult<()> {
        let mut inner = self.write()?;
        if !inner.contains(from) {
            return Err(not_found(from, "nothing to move"));
        }

        let rebase = |p: &Path| -> Option<PathBuf> {
            p.strip_prefix(from).ok().map(|rest| {
                if rest.as_os_str().is_empty() {
                    to.to_path_buf()
                } else {
                    to.join(rest)
                }
            })
        };

        let files: Vec<(PathBuf, String)> = inner
            .files
            .iter()
            .filter_map(|(p, c)| rebase(p).map(|_| (p.clone(), c.clone())))
            .collect();
        for (old, content) in files {
            inner.files.remove(&old);
            if let Some(new) = rebase(&old) {
                inner.files.insert(new, content);
            }
        }

        let dirs: Vec<PathBuf> = inner
            .directories
            .iter()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();
        for old in dirs {
            inner.directories.remove(&old);
            if let Some(new) = rebase(&old) {
                inner.directories.insert(new);
            }
        }

        Ok(())
    }

    fn remove_all(&self, path: &Path) -> GraftResult<()> {
        let mut inner = self.write()?;

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));

        Ok(())
    }
}

fn not_found(path: &Path, reason: &str) -> GraftError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

fn poisoned() -> GraftError {
    GraftError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}
