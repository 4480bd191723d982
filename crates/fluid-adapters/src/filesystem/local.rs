//! Local filesystem adapter using std::fs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fluid_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{FluidError, FluidResult},
};
use tracing::debug;
use uuid::Uuid;
use walkdir::WalkDir;

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
    fn create_dir_all(&self, path: &Path) -> FluidResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> FluidResult<()> {
        fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_dir_all(&self, path: &Path) -> FluidResult<()> {
        fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn copy_dir(&self, from: &Path, to: &Path) -> FluidResult<()> {
        let mut copied = 0usize;
        for entry in WalkDir::new(from).follow_links(true) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(from).to_path_buf();
                map_io_error(&path, io::Error::other(e), "walk directory")
            })?;

            let relative = entry
                .path()
                .strip_prefix(from)
                .map_err(|e| map_io_error(entry.path(), io::Error::other(e), "resolve path"))?;
            let dest = to.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&dest).map_err(|e| map_io_error(&dest, e, "create directory"))?;
            } else {
                fs::copy(entry.path(), &dest).map_err(|e| map_io_error(&dest, e, "copy file"))?;
                copied += 1;
            }
        }
        debug!(from = %from.display(), to = %to.display(), files = copied, "Copied tree");
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> FluidResult<()> {
        fs::rename(from, to).map_err(|e| map_io_error(to, e, "rename"))
    }

    fn repoint_link(&self, link: &Path, target: &Path) -> FluidResult<()> {
        match fs::symlink_metadata(link) {
            Ok(meta) if meta.is_dir() => {
                fs::remove_dir_all(link).map_err(|e| map_io_error(link, e, "remove directory"))?
            }
            Ok(_) => remove_link(link).map_err(|e| map_io_error(link, e, "remove link"))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(map_io_error(link, e, "inspect link")),
        }
        symlink_dir(target, link).map_err(|e| map_io_error(link, e, "create link"))
    }

    fn create_temp_dir(&self, prefix: &str) -> FluidResult<PathBuf> {
        let path = std::env::temp_dir().join(format!("{prefix}-{}", Uuid::new_v4().simple()));
        fs::create_dir_all(&path).map_err(|e| map_io_error(&path, e, "create temp directory"))?;
        Ok(path)
    }
}

#[cfg(unix)]
fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

#[cfg(unix)]
fn remove_link(link: &Path) -> io::Result<()> {
    fs::remove_file(link)
}

// Directory symlinks on Windows are removed as directories.
#[cfg(windows)]
fn remove_link(link: &Path) -> io::Result<()> {
    fs::remove_file(link).or_else(|_| fs::remove_dir(link))
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> FluidError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
