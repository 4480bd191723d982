//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `fluid-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File and directory operations
//!   - `HttpFetcher`: Release metadata and tarball downloads
//!   - `Archiver`: gzip-tar extraction and packaging
//!   - `SourceRenderer`: Entity/contract source templates
//!   - `CodeFormatter`: Post-generation formatting pass
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Archiver, CodeFormatter, FetchResponse, Filesystem, HttpFetcher, SourceRenderer};

#[cfg(test)]
pub use output::{MockArchiver, MockCodeFormatter, MockFilesystem, MockHttpFetcher, MockSourceRenderer};
