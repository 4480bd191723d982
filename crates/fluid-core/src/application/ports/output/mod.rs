//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `fluid-adapters` crate provides implementations.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::services::{ContractView, EntityView};
use crate::error::FluidResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `fluid_adapters::filesystem::LocalFilesystem` (production)
/// - `fluid_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> FluidResult<()>;

    /// Write content to a file, replacing any existing file.
    fn write_file(&self, path: &Path, content: &str) -> FluidResult<()>;

    /// Check if path exists (following links).
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> FluidResult<()>;

    /// Recursively copy `from` into a new directory `to`, dereferencing
    /// symbolic links.
    fn copy_dir(&self, from: &Path, to: &Path) -> FluidResult<()>;

    /// Atomically move `from` to `to` (same filesystem).
    fn rename(&self, from: &Path, to: &Path) -> FluidResult<()>;

    /// Replace `link` with a symbolic link pointing at `target`.
    fn repoint_link(&self, link: &Path, target: &Path) -> FluidResult<()>;

    /// Create a fresh, uniquely named directory below the system temp dir.
    fn create_temp_dir(&self, prefix: &str) -> FluidResult<PathBuf>;
}

/// Status and body of a completed HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Port for HTTP GET requests.
///
/// Implemented by:
/// - `fluid_adapters::http::UreqFetcher`
#[cfg_attr(test, mockall::automock)]
pub trait HttpFetcher: Send + Sync {
    /// Fetch a small document. Any status is returned as a response; only
    /// transport failures are errors.
    fn fetch(&self, url: &str, timeout: Duration) -> FluidResult<FetchResponse>;

    /// Open a streaming download. A status other than 200 is an error.
    fn open(&self, url: &str, timeout: Duration) -> FluidResult<Box<dyn Read + Send>>;
}

/// Port for gzip-tar archives.
///
/// Implemented by:
/// - `fluid_adapters::archive::TarGzArchiver`
#[cfg_attr(test, mockall::automock)]
pub trait Archiver: Send + Sync {
    /// Unpack a gzip-tar stream into `dest`, dropping the single top-level
    /// directory every entry is nested in.
    fn extract_stripped(&self, archive: Box<dyn Read + Send>, dest: &Path) -> FluidResult<()>;

    /// Pack `base/root` into the gzip-tar file `archive`, with entry paths
    /// relative to `base`.
    fn pack(&self, base: &Path, root: &str, archive: &Path) -> FluidResult<()>;
}

/// Port for source file templates.
///
/// Implemented by:
/// - `fluid_adapters::renderer::TeraRenderer`
#[cfg_attr(test, mockall::automock)]
pub trait SourceRenderer: Send + Sync {
    /// File extension of the rendered language, without the dot.
    fn extension(&self) -> &'static str;

    fn render_entity(&self, entity: &EntityView) -> FluidResult<String>;

    fn render_contract(&self, contract: &ContractView) -> FluidResult<String>;
}

/// Port for the formatting pass run over a directory of generated files.
///
/// Implemented by:
/// - `fluid_adapters::formatter::CommandFormatter`
/// - `fluid_adapters::formatter::NoopFormatter`
#[cfg_attr(test, mockall::automock)]
pub trait CodeFormatter: Send + Sync {
    fn format(&self, dir: &Path) -> FluidResult<()>;
}
