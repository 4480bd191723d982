//! Application layer for Fluid.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (TemplateCacheService, CodeGenerator, BuildService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    BuildService, CodeGenerator, ContractView, EntityView, FieldView, SyncOutcome, SyncReport,
    SyncStatus, TemplateCacheService, storage_key,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Archiver, CodeFormatter, FetchResponse, Filesystem, HttpFetcher, SourceRenderer};

pub use error::{ApplicationError, SyncError};
