//! Code generator - renders schema objects into source files.
//!
//! Naming is derived entirely through the case converter:
//!
//! | Item | Rule |
//! |---|---|
//! | entity file | `to_snake(name_singular)` + extension |
//! | contract file | `to_snake(name + " " + type)` + extension |
//! | entity type | `to_pascal(name_singular)` |
//! | contract type | `to_pascal(name) + to_pascal(type)` |
//! | collection constant | `Collection` + `to_pascal(name_plural)` |
//! | collection key | `to_camel(name_plural)` |
//! | field storage key | `to_camel(field.name)`, `_id` for "id" in any case |

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::{CodeFormatter, Filesystem, SourceRenderer},
    domain::{Contract, Entity, Field, GeneratedFile, RelativePath, casing},
    error::{FluidError, FluidResult},
};

/// Storage key reserved for the primary identifier.
pub const ID_KEY: &str = "_id";

/// Per-field storage key used in generated serialization tags.
pub fn storage_key(field_name: &str) -> String {
    if field_name.eq_ignore_ascii_case("id") {
        ID_KEY.to_string()
    } else {
        casing::to_camel(field_name)
    }
}

/// Template input for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub name: String,
    pub kind: String,
    pub key: String,
    pub comment: Vec<String>,
}

/// Template input for an entity file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityView {
    pub type_name: String,
    pub collection_const: String,
    pub collection_key: String,
    pub fields: Vec<FieldView>,
}

/// Template input for a contract file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractView {
    pub type_name: String,
    pub fields: Vec<FieldView>,
}

impl FieldView {
    pub fn from_field(field: &Field) -> Self {
        Self {
            name: casing::to_pascal(&field.name),
            kind: field.kind.trim().to_string(),
            key: storage_key(&field.name),
            comment: field
                .description
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect(),
        }
    }
}

impl EntityView {
    pub fn from_entity(entity: &Entity) -> Self {
        Self {
            type_name: casing::to_pascal(&entity.name_singular),
            collection_const: format!("Collection{}", casing::to_pascal(&entity.name_plural)),
            collection_key: casing::to_camel(&entity.name_plural),
            fields: entity.fields.iter().map(FieldView::from_field).collect(),
        }
    }
}

impl ContractView {
    pub fn from_contract(contract: &Contract) -> Self {
        Self {
            type_name: format!(
                "{}{}",
                casing::to_pascal(&contract.name),
                casing::to_pascal(&contract.kind)
            ),
            fields: contract.fields.iter().map(FieldView::from_field).collect(),
        }
    }
}

/// Renders entities and contracts and writes them below an output directory.
pub struct CodeGenerator {
    renderer: Box<dyn SourceRenderer>,
    filesystem: Arc<dyn Filesystem>,
    formatter: Box<dyn CodeFormatter>,
    strict_formatting: bool,
}

impl CodeGenerator {
    pub fn new(
        renderer: Box<dyn SourceRenderer>,
        filesystem: Arc<dyn Filesystem>,
        formatter: Box<dyn CodeFormatter>,
    ) -> Self {
        Self {
            renderer,
            filesystem,
            formatter,
            strict_formatting: false,
        }
    }

    /// When strict, a formatter failure fails the generation.
    pub fn with_strict_formatting(mut self, strict: bool) -> Self {
        self.strict_formatting = strict;
        self
    }

    /// Render an entity without touching the filesystem.
    pub fn entity_file(&self, entity: &Entity) -> FluidResult<GeneratedFile> {
        let content = self.renderer.render_entity(&EntityView::from_entity(entity))?;
        let path = self.file_name(&entity.name_singular)?;
        Ok(GeneratedFile::new(path, content))
    }

    /// Render a contract without touching the filesystem.
    pub fn contract_file(&self, contract: &Contract) -> FluidResult<GeneratedFile> {
        let content = self
            .renderer
            .render_contract(&ContractView::from_contract(contract))?;
        let path = self.file_name(&format!("{} {}", contract.name, contract.kind))?;
        Ok(GeneratedFile::new(path, content))
    }

    /// Render one entity into `output_dir`, replacing any existing file.
    #[instrument(skip_all, fields(entity = %entity.name_singular))]
    pub fn render_entity(&self, entity: &Entity, output_dir: &Path) -> FluidResult<PathBuf> {
        let file = self.entity_file(entity)?;
        self.write(&file, output_dir)
    }

    /// Render one contract into `output_dir`, replacing any existing file.
    #[instrument(skip_all, fields(contract = %contract.key))]
    pub fn render_contract(&self, contract: &Contract, output_dir: &Path) -> FluidResult<PathBuf> {
        let file = self.contract_file(contract)?;
        self.write(&file, output_dir)
    }

    /// Render every entity, then run one formatting pass over `output_dir`.
    pub fn render_entities(&self, entities: &[Entity], output_dir: &Path) -> FluidResult<Vec<PathBuf>> {
        let written = self.render_all(entities, output_dir, |e, dir| self.render_entity(e, dir))?;
        info!(count = written.len(), dir = %output_dir.display(), "Entities generated");
        Ok(written)
    }

    /// Render every contract, then run one formatting pass over `output_dir`.
    pub fn render_contracts(
        &self,
        contracts: &[Contract],
        output_dir: &Path,
    ) -> FluidResult<Vec<PathBuf>> {
        let written = self.render_all(contracts, output_dir, |c, dir| self.render_contract(c, dir))?;
        info!(count = written.len(), dir = %output_dir.display(), "Contracts generated");
        Ok(written)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn render_all<T>(
        &self,
        items: &[T],
        output_dir: &Path,
        render: impl Fn(&T, &Path) -> FluidResult<PathBuf>,
    ) -> FluidResult<Vec<PathBuf>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        self.filesystem.create_dir_all(output_dir)?;
        let written = items
            .iter()
            .map(|item| render(item, output_dir))
            .collect::<FluidResult<Vec<_>>>()?;

        self.format(output_dir)?;
        Ok(written)
    }

    fn file_name(&self, name: &str) -> FluidResult<RelativePath> {
        let stem = casing::to_snake(name);
        RelativePath::try_new(format!("{stem}.{}", self.renderer.extension())).map_err(FluidError::from)
    }

    fn write(&self, file: &GeneratedFile, output_dir: &Path) -> FluidResult<PathBuf> {
        let destination = file.destination(output_dir);
        self.filesystem.write_file(&destination, file.content())?;
        debug!(path = %destination.display(), bytes = file.size(), "Wrote generated file");
        Ok(destination)
    }

    fn format(&self, dir: &Path) -> FluidResult<()> {
        match self.formatter.format(dir) {
            Ok(()) => Ok(()),
            Err(e) if !self.strict_formatting => {
                warn!(error = %e, dir = %dir.display(), "Formatting skipped");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
