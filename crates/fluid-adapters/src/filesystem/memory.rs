//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockWriteGuard},
};

use fluid_core::{
    application::{ApplicationError, ports::Filesystem},
    error::FluidResult,
};
use uuid::Uuid;

/// In-memory filesystem for testing.
///
/// Links are stored as absolute targets and resolved on lookup, one hop
/// deep, which is all the template cache ever creates.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    links: HashMap<PathBuf, PathBuf>,
}

impl MemoryFilesystemInner {
    fn resolve(&self, path: &Path) -> PathBuf {
        for (link, target) in &self.links {
            if let Ok(rest) = path.strip_prefix(link) {
                return if rest.as_os_str().is_empty() {
                    target.clone()
                } else {
                    target.join(rest)
                };
            }
        }
        path.to_path_buf()
    }

    fn add_dir_all(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }

    fn move_prefix<T>(map: &mut BTreeMap<PathBuf, T>, from: &Path, to: &Path) {
        let moved: Vec<_> = map
            .keys()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();
        for old in moved {
            if let (Some(value), Ok(rest)) = (map.remove(&old), old.strip_prefix(from)) {
                map.insert(to.join(rest), value);
            }
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
        inner.files.get(&inner.resolve(path)).cloned()
    }

    /// Target of a link, if `path` is one.
    pub fn read_link(&self, path: &Path) -> Option<PathBuf> {
        let inner = self.inner.read().ok()?;
        inner.links.get(path).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn write(&self) -> FluidResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        Ok(self.inner.write().map_err(|_| ApplicationError::StoreLockError)?)
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

fn fs_error(path: &Path, reason: &str) -> fluid_core::error::FluidError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> FluidResult<()> {
        let mut inner = self.write()?;
        let resolved = inner.resolve(path);
        inner.add_dir_all(&resolved);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> FluidResult<()> {
        let mut inner = self.write()?;
        let path = inner.resolve(path);

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(fs_error(&path, "Parent directory does not exist"));
            }
        }

        inner.files.insert(path, content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| {
                let path = inner.resolve(path);
                inner.files.contains_key(&path) || inner.directories.contains(&path)
            })
            .unwrap_or(false)
    }

    fn remove_dir_all(&self, path: &Path) -> FluidResult<()> {
        let mut inner = self.write()?;
        if !inner.directories.contains(path) {
            return Err(fs_error(path, "Directory does not exist"));
        }

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        inner.links.retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    fn copy_dir(&self, from: &Path, to: &Path) -> FluidResult<()> {
        let mut inner = self.write()?;
        let source = inner.resolve(from);
        if !inner.directories.contains(&source) {
            return Err(fs_error(from, "Source directory does not exist"));
        }

        let dirs: Vec<PathBuf> = inner
            .directories
            .iter()
            .filter_map(|p| p.strip_prefix(&source).ok().map(|rest| to.join(rest)))
            .collect();
        let files: Vec<(PathBuf, String)> = inner
            .files
            .iter()
            .filter_map(|(p, c)| p.strip_prefix(&source).ok().map(|rest| (to.join(rest), c.clone())))
            .collect();

        for dir in dirs {
            inner.add_dir_all(&dir);
        }
        inner.files.extend(files);
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> FluidResult<()> {
        let mut inner = self.write()?;
        if !inner.directories.contains(from) {
            return Err(fs_error(from, "Source does not exist"));
        }
        if inner.directories.contains(to) {
            return Err(fs_error(to, "Destination already exists"));
        }

        let dirs: Vec<PathBuf> = inner
            .directories
            .iter()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();
        for dir in dirs {
            inner.directories.remove(&dir);
            if let Ok(rest) = dir.strip_prefix(from) {
                inner.directories.insert(to.join(rest));
            }
        }
        MemoryFilesystemInner::move_prefix(&mut inner.files, from, to);
        Ok(())
    }

    fn repoint_link(&self, link: &Path, target: &Path) -> FluidResult<()> {
        let mut inner = self.write()?;
        let absolute = match link.parent() {
            Some(parent) if target.is_relative() => parent.join(target),
            _ => target.to_path_buf(),
        };
        inner.links.insert(link.to_path_buf(), absolute);
        Ok(())
    }

    fn create_temp_dir(&self, prefix: &str) -> FluidResult<PathBuf> {
        let path = PathBuf::from("/tmp").join(format!("{prefix}-{}", Uuid::new_v4().simple()));
        self.write()?.add_dir_all(&path);
        Ok(path)
    }
}
