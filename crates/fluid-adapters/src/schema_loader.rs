//! Project schema documents.
//!
//! A schema is read from a TOML or JSON file, chosen by extension:
//!
//! ```text
//! fluid.toml   → TOML
//! fluid.json   → JSON
//! ```
//!
//! Both formats accept the snake_case keys of the Rust model and the
//! camelCase keys (`nameSingular`, `accountEntityKeys`, ...) used by JSON
//! blueprints.

use std::{fmt, fs, path::Path, str::FromStr};

use fluid_core::{
    application::ApplicationError,
    domain::ProjectSchema,
    error::{FluidError, FluidResult},
};
use tracing::{debug, instrument};

/// Serialization format of a schema document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaFormat {
    #[default]
    Toml,
    Json,
}

impl SchemaFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> FluidResult<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(FluidError::Configuration {
                message: format!(
                    "cannot tell schema format of '{}' (expected .toml or .json)",
                    path.display()
                ),
            }),
        }
    }
}

impl fmt::Display for SchemaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toml => f.write_str("toml"),
            Self::Json => f.write_str("json"),
        }
    }
}

impl FromStr for SchemaFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown schema format '{other}'")),
        }
    }
}

/// Loads and serializes [`ProjectSchema`] documents.
pub struct SchemaLoader;

impl SchemaLoader {
    /// Read and parse a schema file.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> FluidResult<ProjectSchema> {
        let format = SchemaFormat::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|e| ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: format!("Failed to read schema: {e}"),
        })?;

        let schema = Self::parse(&content, format).map_err(|e| match e {
            FluidError::Configuration { message } => FluidError::Configuration {
                message: format!("{}: {message}", path.display()),
            },
            other => other,
        })?;
        debug!(
            name = %schema.name,
            entities = schema.entities.len(),
            contracts = schema.contracts.len(),
            portals = schema.portals.len(),
            "Schema loaded"
        );
        Ok(schema)
    }

    /// Parse a schema document.
    pub fn parse(content: &str, format: SchemaFormat) -> FluidResult<ProjectSchema> {
        let parsed = match format {
            SchemaFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            SchemaFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| FluidError::Configuration {
            message: format!("invalid {format} schema: {message}"),
        })
    }

    /// Render a schema as a document in `format`.
    pub fn to_string(schema: &ProjectSchema, format: SchemaFormat) -> FluidResult<String> {
        let rendered = match format {
            SchemaFormat::Toml => toml::to_string_pretty(schema).map_err(|e| e.to_string()),
            SchemaFormat::Json => serde_json::to_string_pretty(schema).map_err(|e| e.to_string()),
        };
        rendered.map_err(|message| FluidError::Internal {
            message: format!("serializing schema as {format}: {message}"),
        })
    }
}
