//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ReleaseError;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// HTTP request failed before a status was received.
    #[error("Request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    /// Archive could not be read or written.
    #[error("Archive error at {path}: {reason}")]
    ArchiveFailed { path: PathBuf, reason: String },

    /// Source template rendering failed.
    #[error("Source rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// External formatter could not run or reported failure.
    #[error("Formatter '{command}' failed: {reason}")]
    FormatterFailed { command: String, reason: String },

    /// A template tree needed by the build has never been synchronised.
    #[error("Template '{template}' is not cached (expected {path})")]
    TemplateNotCached { template: String, path: PathBuf },

    /// Store access failed (lock poisoned, etc.).
    #[error("Filesystem store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::Network { .. } => vec![
                "Check your network connection".into(),
                "Build from the existing cache with: fluid build --offline".into(),
            ],
            Self::TemplateNotCached { template, .. } => vec![
                format!("No release of '{template}' has been downloaded yet"),
                "Download the templates with: fluid sync".into(),
            ],
            Self::FormatterFailed { command, .. } => vec![
                format!("Make sure '{command}' is installed and on PATH"),
                "Or set formatter.strict = false to skip formatting".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Network { .. } => ErrorCategory::Network,
            Self::TemplateNotCached { .. } => ErrorCategory::NotFound,
            Self::FormatterFailed { .. } => ErrorCategory::Configuration,
            Self::FilesystemError { .. }
            | Self::ArchiveFailed { .. }
            | Self::RenderingFailed { .. }
            | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}

/// Outcome of synchronising one template repository.
///
/// Recoverable errors leave the cache untouched and the repository is
/// skipped for this run. Fatal errors abort the whole sync.
#[derive(Debug, Error, Clone)]
pub enum SyncError {
    #[error("fetching release info from {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    #[error("release info endpoint {url} answered with status {status}")]
    BadStatus { url: String, status: u16 },

    #[error("release info for '{repository}' rejected: {source}")]
    Release {
        repository: String,
        #[source]
        source: ReleaseError,
    },

    #[error("downloading {url} failed: {reason}")]
    Download { url: String, reason: String },

    #[error("extracting release '{tag}' of '{repository}' failed: {reason}")]
    Extraction {
        repository: String,
        tag: String,
        reason: String,
    },

    #[error("cache update at {path} failed: {reason}")]
    Filesystem { path: PathBuf, reason: String },
}

impl SyncError {
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Fetch { .. } | Self::BadStatus { .. } | Self::Release { .. } | Self::Download { .. }
        )
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Extraction { repository, .. } => vec![
                format!("The '{repository}' release archive could not be unpacked"),
                "Check free disk space under the cache root and run: fluid sync".into(),
            ],
            Self::Filesystem { path, .. } => vec![
                format!("Check permissions on {}", path.display()),
            ],
            _ => vec!["The repository will be retried on the next run".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        if self.is_recoverable() {
            ErrorCategory::Network
        } else {
            ErrorCategory::Internal
        }
    }
}
