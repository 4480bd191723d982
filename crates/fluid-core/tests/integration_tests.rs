//! Integration tests for fluid-core public API.

use fluid_core::{
    application::{ContractView, EntityView, FieldView, storage_key},
    domain::{DomainError, casing},
    prelude::*,
};

fn parse_schema(json: &str) -> ProjectSchema {
    serde_json::from_str(json).unwrap()
}

#[test]
fn kebab_examples() {
    assert_eq!(casing::to_kebab("First Name"), "first-name");
    assert_eq!(casing::to_kebab("buildRequest"), "build-request");
    assert_eq!(casing::to_kebab("base_api"), "base-api");
    assert_eq!(casing::to_kebab("ID"), "id");
}

#[test]
fn derived_forms() {
    assert_eq!(casing::to_pascal("first-name"), "FirstName");
    assert_eq!(casing::to_camel("first-name"), "firstName");
    assert_eq!(casing::to_snake("First Name"), "first_name");
    assert_eq!(casing::to_title("first-name"), "First Name");
}

#[test]
fn kebab_is_idempotent_on_identifiers() {
    for s in [
        "First Name",
        "buildRequest",
        "BuildRequest",
        "base_api",
        "ID",
        "X",
        "2024",
        "already-kebab",
        "Build Parameters",
    ] {
        let once = casing::to_kebab(s);
        assert_eq!(casing::to_kebab(&once), once, "not idempotent for {s:?}");
    }
}

#[test]
fn entity_with_one_field_names_type_and_collection() {
    let schema = parse_schema(
        r#"{
            "name": "Fluid",
            "version": "1.0.0",
            "entities": [{
                "name_singular": "Project",
                "name_plural": "Projects",
                "fields": [{"name": "Name", "type": "string"}]
            }]
        }"#,
    );
    assert!(schema.validate().is_ok());

    let view = EntityView::from_entity(&schema.entities[0]);
    assert_eq!(view.type_name, "Project");
    assert_eq!(view.collection_const, "CollectionProjects");
    assert_eq!(view.collection_key, "projects");
    assert_eq!(
        view.fields,
        vec![FieldView {
            name: "Name".into(),
            kind: "string".into(),
            key: "name".into(),
            comment: vec![],
        }]
    );
}

#[test]
fn contract_type_name() {
    let contract = Contract {
        key: "build-request".into(),
        name: "Build".into(),
        kind: "parameters".into(),
        fields: vec![Field::new("Id", "string")],
    };
    let view = ContractView::from_contract(&contract);
    assert_eq!(view.type_name, "BuildParameters");
    assert_eq!(view.fields[0].key, "_id");
}

#[test]
fn reserved_id_key_in_any_case() {
    for name in ["Id", "ID", "id", "iD"] {
        assert_eq!(storage_key(name), "_id");
    }
}

#[test]
fn unknown_portal_type_is_configuration_error() {
    let portal = Portal::new("Kiosk", "flutter");
    let err: FluidError = portal.portal_kind().unwrap_err().into();
    assert!(matches!(
        err,
        FluidError::Domain(DomainError::UnsupportedPortalType { .. })
    ));
    assert_eq!(err.category(), fluid_core::error::ErrorCategory::Configuration);
}
