// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (callers may keep them across build attempts)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid project schema ({} problem(s)):\n  - {}", problems.len(), problems.join("\n  - "))]
    InvalidSchema { problems: Vec<String> },

    #[error("Path escapes its root: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    #[error("portal type '{kind}' not supported (portal '{portal}')")]
    UnsupportedPortalType { portal: String, kind: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidSchema { problems } => vec![
                format!("Fix the {} problem(s) listed above in the schema document", problems.len()),
                "Print the resolved schema with: fluid schema".into(),
            ],
            Self::UnsupportedPortalType { kind, .. } => vec![
                format!("'{kind}' has no cached template tree"),
                "Supported portal types: ionic, vuetify".into(),
            ],
            Self::AbsolutePathNotAllowed { .. } => vec![
                "Generated paths must stay inside the project directory".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidSchema { .. } => ErrorCategory::Validation,
            Self::UnsupportedPortalType { .. } => ErrorCategory::Configuration,
            Self::AbsolutePathNotAllowed { .. } => ErrorCategory::Internal,
        }
    }
}

/// Problems with a release-info document. Always recoverable: the
/// repository is skipped for this run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReleaseError {
    #[error("malformed release info: {0}")]
    Malformed(String),

    #[error("release info tag name may not be empty")]
    EmptyTag,

    #[error("release info tarball url may not be empty")]
    EmptyTarballUrl,

    #[error("release tag '{0}' is not a valid directory name")]
    UnsafeTag(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_lists_every_problem() {
        let err = DomainError::InvalidSchema {
            problems: vec!["a is wrong".into(), "b is wrong".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("2 problem(s)"));
        assert!(msg.contains("  - a is wrong\n  - b is wrong"));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn unsupported_portal_is_configuration() {
        let err = DomainError::UnsupportedPortalType {
            portal: "Mobile".into(),
            kind: "flutter".into(),
        };
        assert_eq!(err.to_string(), "portal type 'flutter' not supported (portal 'Mobile')");
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.suggestions().iter().any(|s| s.contains("vuetify")));
    }
}
