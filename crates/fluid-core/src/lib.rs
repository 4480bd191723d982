//! Fluid Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Fluid
//! project generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            fluid-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (TemplateCacheService, CodeGenerator,   │
//! │  BuildService)                          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, HttpFetcher, Archiver,     │
//! │  SourceRenderer, CodeFormatter)         │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     fluid-adapters (Infrastructure)     │
//! │ (LocalFilesystem, UreqFetcher, etc)     │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (casing, ProjectSchema, ReleaseInfo)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fluid_core::prelude::*;
//!
//! let cache = TemplateCacheService::new(fetcher, filesystem.clone(), archiver.clone());
//! cache.sync(&repositories)?;
//!
//! let generator = CodeGenerator::new(renderer, filesystem.clone(), formatter);
//! let build = BuildService::new(repositories, filesystem, archiver, generator);
//! let artifact = build.build(&schema, Path::new("./dist"))?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BuildService, CodeGenerator, SyncReport, SyncStatus, TemplateCacheService,
        ports::{Archiver, CodeFormatter, Filesystem, HttpFetcher, SourceRenderer},
    };
    pub use crate::domain::{
        Contract, Entity, Field, Portal, PortalKind, ProjectSchema, TemplateKind,
        TemplateRepository, casing,
    };
    pub use crate::error::{FluidError, FluidResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
