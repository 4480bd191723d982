//! Unified error handling for Fluid Core.
//!
//! This module provides a unified error type that wraps domain, application
//! and cache-sync errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::{ApplicationError, SyncError};
use crate::domain::DomainError;

/// Root error type for Fluid Core operations.
#[derive(Debug, Error, Clone)]
pub enum FluidError {
    /// Errors from the domain layer (schema and configuration violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Fatal template cache synchronisation errors.
    #[error("Template sync error: {0}")]
    Sync(#[from] SyncError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl FluidError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Sync(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup with: fluid config list".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in Fluid".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Sync(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Application(ApplicationError::StoreLockError) => true,
            Self::Sync(e) => e.is_recoverable(),
            _ => false,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Network,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type FluidResult<T> = Result<T, FluidError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn domain_categories_are_mapped() {
        let err: FluidError = DomainError::UnsupportedPortalType {
            portal: "Mobile".into(),
            kind: "flutter".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(!err.is_retryable());
    }

    #[test]
    fn missing_template_is_not_found() {
        let err: FluidError = ApplicationError::TemplateNotCached {
            template: "api".into(),
            path: PathBuf::from("/cache/api/latest"),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.suggestions().iter().any(|s| s.contains("fluid sync")));
    }
}
