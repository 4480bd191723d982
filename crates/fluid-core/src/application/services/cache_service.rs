//! Template cache service - keeps one extracted tree per upstream release.
//!
//! Synchronisation is idempotent and safe to run on every invocation:
//! a tag whose directory already exists is never downloaded again, and
//! the `latest` pointer only ever moves to a complete tree.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        SyncError,
        ports::{Archiver, Filesystem, HttpFetcher},
    },
    domain::{DomainValidator as validator, TemplateKind, TemplateRepository},
    error::FluidResult,
};

pub const DEFAULT_METADATA_TIMEOUT: Duration = Duration::from_secs(2);
pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Successful outcome for one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Downloaded { tag: String },
    UpToDate { tag: String },
}

/// Per-repository line of a [`SyncReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    Synced(SyncOutcome),
    Skipped { reason: String },
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Synced(SyncOutcome::Downloaded { tag }) => write!(f, "downloaded {tag}"),
            Self::Synced(SyncOutcome::UpToDate { tag }) => write!(f, "up to date ({tag})"),
            Self::Skipped { reason } => write!(f, "skipped: {reason}"),
        }
    }
}

/// Result of a full sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub entries: Vec<(TemplateKind, SyncStatus)>,
}

impl SyncReport {
    pub fn downloaded(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, s)| matches!(s, SyncStatus::Synced(SyncOutcome::Downloaded { .. })))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, s)| matches!(s, SyncStatus::Skipped { .. }))
            .count()
    }

    pub fn status(&self, kind: TemplateKind) -> Option<&SyncStatus> {
        self.entries.iter().find(|(k, _)| *k == kind).map(|(_, s)| s)
    }
}

/// Resolves, downloads and extracts upstream template releases.
pub struct TemplateCacheService {
    fetcher: Box<dyn HttpFetcher>,
    filesystem: Arc<dyn Filesystem>,
    archiver: Arc<dyn Archiver>,
    metadata_timeout: Duration,
    download_timeout: Duration,
}

impl TemplateCacheService {
    pub fn new(
        fetcher: Box<dyn HttpFetcher>,
        filesystem: Arc<dyn Filesystem>,
        archiver: Arc<dyn Archiver>,
    ) -> Self {
        Self {
            fetcher,
            filesystem,
            archiver,
            metadata_timeout: DEFAULT_METADATA_TIMEOUT,
            download_timeout: DEFAULT_DOWNLOAD_TIMEOUT,
        }
    }

    pub fn with_timeouts(mut self, metadata: Duration, download: Duration) -> Self {
        self.metadata_timeout = metadata;
        self.download_timeout = download;
        self
    }

    /// Synchronise every repository. Recoverable failures are logged and
    /// the repository is skipped; the first fatal failure aborts the run.
    #[instrument(skip_all, fields(repositories = repositories.len()))]
    pub fn sync(&self, repositories: &[TemplateRepository]) -> FluidResult<SyncReport> {
        let mut report = SyncReport::default();

        for repository in repositories {
            let status = match self.sync_repository(repository) {
                Ok(outcome) => SyncStatus::Synced(outcome),
                Err(e) if e.is_recoverable() => {
                    warn!(template = %repository.kind(), error = %e, "Skipping template sync");
                    SyncStatus::Skipped {
                        reason: e.to_string(),
                    }
                }
                Err(e) => return Err(e.into()),
            };
            report.entries.push((repository.kind(), status));
        }

        info!(
            downloaded = report.downloaded(),
            skipped = report.skipped(),
            "Template sync finished"
        );
        Ok(report)
    }

    /// Synchronise a single repository.
    #[instrument(skip_all, fields(template = %repository.kind()))]
    pub fn sync_repository(&self, repository: &TemplateRepository) -> Result<SyncOutcome, SyncError> {
        let url = repository.endpoint();
        let response = self
            .fetcher
            .fetch(url, self.metadata_timeout)
            .map_err(|e| SyncError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        if !response.is_ok() {
            return Err(SyncError::BadStatus {
                url: url.to_string(),
                status: response.status,
            });
        }

        let release = validator::validate_release(&response.body).map_err(|source| SyncError::Release {
            repository: repository.kind().to_string(),
            source,
        })?;
        let tag = release.tag();
        let tag_dir = repository.tag_dir(tag);

        if self.filesystem.exists(&tag_dir) {
            debug!(tag, "Release already cached");
            self.point_latest(repository, tag)?;
            return Ok(SyncOutcome::UpToDate {
                tag: tag.to_string(),
            });
        }

        info!(tag, url = release.tarball_url(), "Downloading template release");
        let stream = self
            .fetcher
            .open(release.tarball_url(), self.download_timeout)
            .map_err(|e| SyncError::Download {
                url: release.tarball_url().to_string(),
                reason: e.to_string(),
            })?;

        self.filesystem
            .create_dir_all(repository.cache_dir())
            .map_err(|e| fs_error(repository.cache_dir(), e))?;

        let staging = repository
            .cache_dir()
            .join(format!(".staging-{}", Uuid::new_v4().simple()));

        if let Err(e) = self.archiver.extract_stripped(stream, &staging) {
            self.discard(&staging);
            return Err(SyncError::Extraction {
                repository: repository.kind().to_string(),
                tag: tag.to_string(),
                reason: e.to_string(),
            });
        }

        if let Err(e) = self.filesystem.rename(&staging, &tag_dir) {
            self.discard(&staging);
            return Err(fs_error(&tag_dir, e));
        }

        self.point_latest(repository, tag)?;
        info!(tag, "Template release cached");
        Ok(SyncOutcome::Downloaded {
            tag: tag.to_string(),
        })
    }

    fn point_latest(&self, repository: &TemplateRepository, tag: &str) -> Result<(), SyncError> {
        let link = repository.latest();
        self.filesystem
            .repoint_link(&link, Path::new(tag))
            .map_err(|e| fs_error(&link, e))
    }

    fn discard(&self, staging: &Path) {
        if self.filesystem.exists(staging) {
            if let Err(e) = self.filesystem.remove_dir_all(staging) {
                warn!(error = %e, path = %staging.display(), "Failed to remove staging directory");
            }
        }
    }
}

fn fs_error(path: &Path, e: impl fmt::Display) -> SyncError {
    SyncError::Filesystem {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}
