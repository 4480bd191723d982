//! Upstream template repositories and their releases.
//!
//! On-disk layout owned by one [`TemplateRepository`]:
//!
//! ```text
//! <cache_root>/<slug>/
//! ├── v1.4.0/          ← extracted release tree (complete, immutable)
//! ├── v1.5.0/
//! └── latest -> v1.5.0
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::entities::schema::PortalKind;
use crate::domain::error::ReleaseError;

/// Name of the pointer to the most recently synchronised tag.
pub const LATEST: &str = "latest";

/// The upstream template trees a build is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Api,
    Logic,
    Portal(PortalKind),
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 4] = [
        TemplateKind::Api,
        TemplateKind::Logic,
        TemplateKind::Portal(PortalKind::Ionic),
        TemplateKind::Portal(PortalKind::Vuetify),
    ];

    /// Cache directory name for this template.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Logic => "logic",
            Self::Portal(PortalKind::Ionic) => "portal-ionic",
            Self::Portal(PortalKind::Vuetify) => "portal-vuetify",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Descriptor of one upstream template repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRepository {
    kind: TemplateKind,
    release_info_endpoint: String,
    cache_dir: PathBuf,
}

impl TemplateRepository {
    /// `cache_root` is the shared cache directory; this repository's tree
    /// lives under `cache_root/<slug>`.
    pub fn new(kind: TemplateKind, endpoint: impl Into<String>, cache_root: &Path) -> Self {
        Self {
            kind,
            release_info_endpoint: endpoint.into(),
            cache_dir: cache_root.join(kind.slug()),
        }
    }

    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    pub fn endpoint(&self) -> &str {
        &self.release_info_endpoint
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn tag_dir(&self, tag: &str) -> PathBuf {
        self.cache_dir.join(tag)
    }

    pub fn latest(&self) -> PathBuf {
        self.cache_dir.join(LATEST)
    }
}

/// Resolved latest release of a template repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    tag: String,
    tarball_url: String,
}

#[derive(Debug, Deserialize)]
struct ReleasePayload {
    #[serde(default)]
    tag_name: Option<String>,
    #[serde(default)]
    tarball_url: Option<String>,
}

impl ReleaseInfo {
    /// Build from already-extracted values, trimming surrounding whitespace.
    pub fn new(tag: &str, tarball_url: &str) -> Result<Self, ReleaseError> {
        let tag = tag.trim();
        let tarball_url = tarball_url.trim();

        if tag.is_empty() {
            return Err(ReleaseError::EmptyTag);
        }
        if tarball_url.is_empty() {
            return Err(ReleaseError::EmptyTarballUrl);
        }
        if !is_safe_component(tag) {
            return Err(ReleaseError::UnsafeTag(tag.to_string()));
        }

        Ok(Self {
            tag: tag.to_string(),
            tarball_url: tarball_url.to_string(),
        })
    }

    /// Parse a release-info document (`{"tag_name": ..., "tarball_url": ...}`).
    pub fn from_json(body: &[u8]) -> Result<Self, ReleaseError> {
        let payload: ReleasePayload =
            serde_json::from_slice(body).map_err(|e| ReleaseError::Malformed(e.to_string()))?;
        Self::new(
            payload.tag_name.as_deref().unwrap_or_default(),
            payload.tarball_url.as_deref().unwrap_or_default(),
        )
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn tarball_url(&self) -> &str {
        &self.tarball_url
    }
}

/// A tag becomes a directory name, so it must be exactly one normal path
/// component and must not shadow the `latest` pointer.
fn is_safe_component(tag: &str) -> bool {
    !matches!(tag, "." | ".." | LATEST) && !tag.contains(['/', '\\', '\0'])
}
