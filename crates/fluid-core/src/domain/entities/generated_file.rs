use std::path::{Path, PathBuf};

use crate::domain::entities::common::RelativePath;

/// A rendered source file, ready to be written below an output directory.
///
/// Written once as a brand-new file; an existing file at the same path is
/// replaced, never merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    path: RelativePath,
    content: String,
}

impl GeneratedFile {
    pub fn new(path: RelativePath, content: impl Into<String>) -> Self {
        Self {
            path,
            content: content.into(),
        }
    }

    pub fn path(&self) -> &RelativePath {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Absolute destination below `root`.
    pub fn destination(&self, root: &Path) -> PathBuf {
        root.join(self.path.as_path())
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}
