//! Go source renderer backed by `tera`.

use std::error::Error as _;

use fluid_core::{
    application::{
        ApplicationError, ContractView, EntityView,
        ports::SourceRenderer,
    },
    error::{FluidError, FluidResult},
};
use serde::Serialize;
use tera::{Context, Tera};
use tracing::instrument;

const FIELDS: &str = r#"{%- for field in fields %}
{%- for line in field.comment %}
	// {{ line }}
{%- endfor %}
	{{ field.name }} {{ field.kind }} `bson:"{{ field.key }}"`
{%- endfor %}"#;

const ENTITY: &str = r#"package entities

const (
	{{ collection_const }} = "{{ collection_key }}"
)

type {{ type_name }} struct {
{%- include "fields" %}
}
"#;

const CONTRACT: &str = r#"package contracts

type {{ type_name }} struct {
{%- include "fields" %}
}
"#;

const ENTITY_TEMPLATE: &str = "entity.go";
const CONTRACT_TEMPLATE: &str = "contract.go";

/// Renders entities and contracts as Go structs with `bson` tags.
#[derive(Debug)]
pub struct TeraRenderer {
    tera: Tera,
}

impl TeraRenderer {
    pub fn new() -> FluidResult<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(vec![
            ("fields", FIELDS),
            (ENTITY_TEMPLATE, ENTITY),
            (CONTRACT_TEMPLATE, CONTRACT),
        ])
        .map_err(rendering_error)?;
        Ok(Self { tera })
    }

    fn render<T: Serialize>(&self, template: &str, view: &T) -> FluidResult<String> {
        let context = Context::from_serialize(view).map_err(rendering_error)?;
        self.tera.render(template, &context).map_err(rendering_error)
    }
}

/// Tera nests the useful message in the source chain.
fn rendering_error(e: tera::Error) -> FluidError {
    let mut reason = e.to_string();
    let mut source = e.source();
    while let Some(inner) = source {
        reason.push_str(": ");
        reason.push_str(&inner.to_string());
        source = inner.source();
    }
    ApplicationError::RenderingFailed { reason }.into()
}

impl SourceRenderer for TeraRenderer {
    fn extension(&self) -> &'static str {
        "go"
    }

    #[instrument(skip_all, fields(entity = %entity.type_name))]
    fn render_entity(&self, entity: &EntityView) -> FluidResult<String> {
        self.render(ENTITY_TEMPLATE, entity)
    }

    #[instrument(skip_all, fields(contract = %contract.type_name))]
    fn render_contract(&self, contract: &ContractView) -> FluidResult<String> {
        self.render(CONTRACT_TEMPLATE, contract)
    }
}
