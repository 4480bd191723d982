//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "sync template caches" or "build a project".

pub mod build_service;
pub mod cache_service;
pub mod codegen_service;

pub use build_service::BuildService;
pub use cache_service::{SyncOutcome, SyncReport, SyncStatus, TemplateCacheService};
pub use codegen_service::{CodeGenerator, ContractView, EntityView, FieldView, storage_key};
