//! Infrastructure adapters for Fluid.
//!
//! This crate implements the ports defined in `fluid-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod archive;
pub mod builtin_schema;
pub mod filesystem;
pub mod formatter;
pub mod http;
pub mod renderer;
pub mod schema_loader;

// Re-export commonly used adapters
pub use archive::TarGzArchiver;
pub use builtin_schema::default_schema;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use formatter::{CommandFormatter, NoopFormatter};
pub use http::UreqFetcher;
pub use renderer::TeraRenderer;
pub use schema_loader::{SchemaFormat, SchemaLoader};
