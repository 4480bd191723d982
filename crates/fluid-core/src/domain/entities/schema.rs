//! Project schema: the declarative description driving generation.
//!
//! A schema is read once (from a TOML/JSON document or the built-in default)
//! and is never mutated afterwards. Generation only reads the subset it
//! needs: contracts for the API layer, entities for the logic layer, and the
//! portal list for template selection.
//!
//! ```toml
//! name    = "Fluid"
//! version = "v2.0.alpha"
//!
//! [[portals]]
//! name = "Administration"
//! type = "vuetify"
//!
//! [[entities]]
//! name_singular = "Project"
//! name_plural   = "Projects"
//! fields = [{ name = "Name", type = "string" }]
//!
//! [[contracts]]
//! key    = "build-request"
//! name   = "Build"
//! type   = "parameters"
//! fields = [{ name = "Full", type = "bool" }]
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{casing, error::DomainError};

/// Root of a project schema document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSchema {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub portals: Vec<Portal>,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub contracts: Vec<Contract>,
}

/// A UI portal. Only `name` and `kind` influence generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portal {
    pub name: String,
    /// Raw portal type tag (`"ionic"`, `"vuetify"`). Kept as text so that an
    /// unknown tag surfaces as a configuration error at build time rather
    /// than as a parse failure.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, alias = "accountEntityKeys", skip_serializing_if = "Vec::is_empty")]
    pub account_entity_keys: Vec<String>,
    #[serde(default, alias = "lightTheme", skip_serializing_if = "Option::is_none")]
    pub light_theme: Option<Theme>,
    #[serde(default, alias = "darkTheme", skip_serializing_if = "Option::is_none")]
    pub dark_theme: Option<Theme>,
}

/// Colour role (`primary`, `warning`, ...) to colour value.
pub type Theme = BTreeMap<String, String>;

/// A persisted entity, rendered into the logic layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(alias = "nameSingular")]
    pub name_singular: String,
    #[serde(alias = "namePlural")]
    pub name_plural: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<EntityAction>,
}

/// A request/response contract, rendered into the API layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub key: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// A field of an entity or contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    /// Declared type, emitted verbatim into the generated declaration.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// Custom action exposed on an entity. Carried through the schema; not
/// rendered by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityAction {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub method: String,
    #[serde(default, alias = "enableFileDownloadResponse")]
    pub enable_file_download_response: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            description: String::new(),
            group: None,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Portal template families with a cached upstream tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortalKind {
    Ionic,
    Vuetify,
}

impl PortalKind {
    pub const ALL: [PortalKind; 2] = [PortalKind::Ionic, PortalKind::Vuetify];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ionic => "ionic",
            Self::Vuetify => "vuetify",
        }
    }
}

impl fmt::Display for PortalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PortalKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ionic" => Ok(Self::Ionic),
            "vuetify" => Ok(Self::Vuetify),
            other => Err(DomainError::UnsupportedPortalType {
                portal: String::new(),
                kind: other.to_string(),
            }),
        }
    }
}

impl Portal {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            account_entity_keys: Vec::new(),
            light_theme: None,
            dark_theme: None,
        }
    }

    /// Resolve the portal type tag.
    pub fn portal_kind(&self) -> Result<PortalKind, DomainError> {
        self.kind.parse::<PortalKind>().map_err(|_| DomainError::UnsupportedPortalType {
            portal: self.name.clone(),
            kind: self.kind.clone(),
        })
    }

    /// Directory name of this portal inside the generated project.
    pub fn slug(&self) -> String {
        casing::to_kebab(&self.name)
    }
}

impl ProjectSchema {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            portals: Vec::new(),
            entities: Vec::new(),
            contracts: Vec::new(),
        }
    }

    pub fn with_portal(mut self, portal: Portal) -> Self {
        self.portals.push(portal);
        self
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn with_contract(mut self, contract: Contract) -> Self {
        self.contracts.push(contract);
        self
    }

    /// Root folder name of the generated project.
    pub fn slug(&self) -> String {
        casing::to_kebab(&self.name)
    }

    /// File name of the packaged artifact: `<slug>-<version>.tar.gz`.
    pub fn artifact_name(&self) -> String {
        format!("{}-{}.tar.gz", self.slug(), self.version)
    }

    /// Structural validation. Every problem is collected; the error lists
    /// all of them at once.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut problems = Vec::new();

        if self.name.trim().is_empty() {
            problems.push("project name must not be empty".to_string());
        } else if self.slug().is_empty() {
            problems.push(format!(
                "project name '{}' has no letters or digits",
                self.name
            ));
        }

        if self.version.trim().is_empty() {
            problems.push("project version must not be empty".to_string());
        } else if self
            .version
            .chars()
            .any(|c| matches!(c, '/' | '\\') || c.is_whitespace())
        {
            problems.push(format!(
                "project version '{}' must not contain whitespace or path separators",
                self.version
            ));
        }

        let mut portal_slugs: HashSet<String> = ["api", "logic"].map(String::from).into();
        for (i, portal) in self.portals.iter().enumerate() {
            let at = format!("portals[{i}]");
            if portal.name.trim().is_empty() {
                problems.push(format!("{at}: name must not be empty"));
            } else if portal.slug().is_empty() {
                problems.push(format!("{at}: name '{}' has no letters or digits", portal.name));
            } else if !portal_slugs.insert(portal.slug()) {
                problems.push(format!(
                    "{at}: directory '{}' is already used by another target",
                    portal.slug()
                ));
            }
            if portal.kind.trim().is_empty() {
                problems.push(format!("{at}: type must not be empty"));
            }
        }

        let mut entity_files = HashSet::new();
        for (i, entity) in self.entities.iter().enumerate() {
            let at = format!("entities[{i}]");
            if casing::to_snake(&entity.name_singular).is_empty() {
                problems.push(format!("{at}: singular name must contain letters or digits"));
            } else if !entity_files.insert(casing::to_snake(&entity.name_singular)) {
                problems.push(format!(
                    "{at}: entity '{}' is declared more than once",
                    entity.name_singular
                ));
            }
            if casing::to_camel(&entity.name_plural).is_empty() {
                problems.push(format!("{at}: plural name must contain letters or digits"));
            }
            validate_fields(&at, &entity.fields, &mut problems);
        }

        let mut contract_files = HashSet::new();
        for (i, contract) in self.contracts.iter().enumerate() {
            let at = format!("contracts[{i}]");
            if contract.key.trim().is_empty() {
                problems.push(format!("{at}: key must not be empty"));
            }
            if casing::to_snake(&contract.name).is_empty() {
                problems.push(format!("{at}: name must contain letters or digits"));
            }
            if casing::to_snake(&contract.kind).is_empty() {
                problems.push(format!("{at}: type must contain letters or digits"));
            }
            let file = casing::to_snake(&format!("{} {}", contract.name, contract.kind));
            if !file.is_empty() && !contract_files.insert(file) {
                problems.push(format!(
                    "{at}: contract '{} {}' is declared more than once",
                    contract.name, contract.kind
                ));
            }
            validate_fields(&at, &contract.fields, &mut problems);
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(DomainError::InvalidSchema { problems })
        }
    }
}

fn validate_fields(owner: &str, fields: &[Field], problems: &mut Vec<String>) {
    let mut names = HashSet::new();
    for (i, field) in fields.iter().enumerate() {
        let at = format!("{owner}.fields[{i}]");
        if casing::to_pascal(&field.name).is_empty() {
            problems.push(format!("{at}: name must contain letters or digits"));
        } else if !names.insert(casing::to_pascal(&field.name)) {
            problems.push(format!("{at}: field '{}' is declared more than once", field.name));
        }
        if field.kind.trim().is_empty() {
            problems.push(format!("{at}: type must not be empty"));
        }
    }
}
