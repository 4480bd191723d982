//! Build Service - assembles and packages a generated project.
//!
//! This service coordinates the build workflow:
//! 1. Validate the schema and resolve every template tree
//! 2. Copy cached trees into a temporary project directory
//! 3. Generate contracts and entities into the copied trees
//! 4. Pack the project directory into `<slug>-<version>.tar.gz`
//!
//! Nothing is written before step 2, and the temporary directory is
//! removed on every exit path.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError, CodeGenerator,
        ports::{Archiver, Filesystem},
    },
    domain::{DomainValidator, LATEST, Portal, ProjectSchema, TemplateKind, TemplateRepository},
    error::FluidResult,
};

const API_DIR: &str = "api";
const LOGIC_DIR: &str = "logic";
const CONTRACTS_DIR: &str = "service/contracts";
const ENTITIES_DIR: &str = "service/entities";
const TEMP_PREFIX: &str = "fluid";

/// Main build service.
pub struct BuildService {
    repositories: Vec<TemplateRepository>,
    filesystem: Arc<dyn Filesystem>,
    archiver: Arc<dyn Archiver>,
    generator: CodeGenerator,
}

/// Template tree copied to a directory of the project root.
struct Layer<'a> {
    source: PathBuf,
    target: String,
    portal: Option<&'a Portal>,
}

impl BuildService {
    pub fn new(
        repositories: Vec<TemplateRepository>,
        filesystem: Arc<dyn Filesystem>,
        archiver: Arc<dyn Archiver>,
        generator: CodeGenerator,
    ) -> Self {
        Self {
            repositories,
            filesystem,
            archiver,
            generator,
        }
    }

    /// Build `schema` into an archive inside `output_dir` and return its path.
    #[instrument(
        skip_all,
        fields(project = %schema.name, version = %schema.version, output = %output_dir.display())
    )]
    pub fn build(&self, schema: &ProjectSchema, output_dir: &Path) -> FluidResult<PathBuf> {
        // 1. Validate everything up front
        DomainValidator::validate_schema(schema)?;
        let layers = self.resolve_layers(schema)?;

        info!(portals = schema.portals.len(), "Building project");

        // 2. Assemble in a scratch directory
        let workspace = TempWorkspace::create(self.filesystem.as_ref())?;
        let slug = schema.slug();
        let root = workspace.path().join(&slug);
        self.filesystem.create_dir_all(&root)?;

        for layer in &layers {
            let target = root.join(&layer.target);
            debug!(from = %layer.source.display(), to = %target.display(), "Copying template tree");
            self.filesystem.copy_dir(&layer.source, &target)?;
            if let Some(portal) = layer.portal {
                info!(portal = %portal.name, kind = %portal.kind, "Portal added");
            }
        }

        // 3. Generate
        self.generator
            .render_contracts(&schema.contracts, &root.join(API_DIR).join(CONTRACTS_DIR))?;
        self.generator
            .render_entities(&schema.entities, &root.join(LOGIC_DIR).join(ENTITIES_DIR))?;

        // 4. Package
        self.filesystem.create_dir_all(output_dir)?;
        let artifact = output_dir.join(schema.artifact_name());
        self.archiver.pack(workspace.path(), &slug, &artifact)?;

        info!(artifact = %artifact.display(), "Build completed successfully");
        Ok(artifact)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Resolve every template tree the build needs, failing before any
    /// filesystem mutation.
    fn resolve_layers<'a>(&self, schema: &'a ProjectSchema) -> FluidResult<Vec<Layer<'a>>> {
        let mut layers = vec![
            Layer {
                source: self.cached_tree(TemplateKind::Api)?,
                target: API_DIR.to_string(),
                portal: None,
            },
            Layer {
                source: self.cached_tree(TemplateKind::Logic)?,
                target: LOGIC_DIR.to_string(),
                portal: None,
            },
        ];

        for portal in &schema.portals {
            let kind = portal.portal_kind()?;
            layers.push(Layer {
                source: self.cached_tree(TemplateKind::Portal(kind))?,
                target: portal.slug(),
                portal: Some(portal),
            });
        }

        Ok(layers)
    }

    fn cached_tree(&self, kind: TemplateKind) -> FluidResult<PathBuf> {
        let latest = self
            .repositories
            .iter()
            .find(|r| r.kind() == kind)
            .map(TemplateRepository::latest);

        match latest {
            Some(path) if self.filesystem.exists(&path) => Ok(path),
            Some(path) => Err(ApplicationError::TemplateNotCached {
                template: kind.to_string(),
                path,
            }
            .into()),
            None => Err(ApplicationError::TemplateNotCached {
                template: kind.to_string(),
                path: PathBuf::from(kind.slug()).join(LATEST),
            }
            .into()),
        }
    }
}

/// Scratch directory removed when dropped.
struct TempWorkspace<'a> {
    filesystem: &'a dyn Filesystem,
    path: PathBuf,
}

impl<'a> TempWorkspace<'a> {
    fn create(filesystem: &'a dyn Filesystem) -> FluidResult<Self> {
        let path = filesystem.create_temp_dir(TEMP_PREFIX)?;
        debug!(path = %path.display(), "Created build directory");
        Ok(Self { filesystem, path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempWorkspace<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.filesystem.remove_dir_all(&self.path) {
            warn!(error = %e, path = %self.path.display(), "Failed to remove build directory");
        }
    }
}
