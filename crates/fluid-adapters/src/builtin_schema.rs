//! Built-in project schema.
//!
//! Used when no schema document is configured: the Fluid project itself,
//! with one administration portal, its account entity, the project entity
//! and the build request contract.

use fluid_core::domain::{
    Contract, Entity, EntityAction, Field, Portal, PortalKind, ProjectSchema, Theme,
};

const THEME_ROLES: [&str; 9] = [
    "primary", "secondary", "tertiary", "warning", "error", "success", "medium", "light", "dark",
];

fn placeholder_theme() -> Theme {
    THEME_ROLES
        .iter()
        .map(|role| (role.to_string(), "#fff".to_string()))
        .collect()
}

fn personal(name: &str, description: &str) -> Field {
    Field {
        group: Some("Personal Details".into()),
        ..Field::new(name, "string").describe(description)
    }
}

fn download_action(name: &str, description: &str) -> EntityAction {
    EntityAction {
        name: name.into(),
        description: description.into(),
        kind: "list".into(),
        method: "get".into(),
        enable_file_download_response: true,
    }
}

/// The schema built when none is configured.
pub fn default_schema() -> ProjectSchema {
    let mut administration = Portal::new("Administration", PortalKind::Vuetify.as_str());
    administration.account_entity_keys = vec!["administrator".into()];
    administration.light_theme = Some(placeholder_theme());
    administration.dark_theme = Some(placeholder_theme());

    ProjectSchema::new("Fluid", "v2.0.alpha")
        .with_portal(administration)
        .with_entity(Entity {
            name_singular: "Administrator".into(),
            name_plural: "Administrators".into(),
            fields: vec![
                personal(
                    "First Name",
                    "A personal name given to someone at birth or baptism and used before a family name.",
                ),
                personal(
                    "Last Name",
                    "A hereditary name common to all members of a family, as distinct from a forename or given name.",
                ),
                personal("Mobile", "Identifies a mobile phone to which messages are delivered."),
                personal("Email", "Identifies an email box to which messages are delivered."),
                personal(
                    "Password",
                    "A secret word or phrase that must be used to gain admission to a place.",
                ),
            ],
            actions: vec![],
        })
        .with_entity(Entity {
            name_singular: "Project".into(),
            name_plural: "Projects".into(),
            fields: vec![Field::new("Name", "string").describe(
                "A name is a term used for identification by an external observer.",
            )],
            actions: vec![
                download_action(
                    "Build",
                    "Generate code for api, logic and portals based on project's structure",
                ),
                download_action("Scheme", "Generate fluid scheme json object blueprint"),
            ],
        })
        .with_contract(Contract {
            key: "build-request".into(),
            name: "Build".into(),
            kind: "parameters".into(),
            fields: vec![Field::new("Full", "bool").describe(
                "A flag indicating if the build should include all once off resource as well. This is normally only done for the first build.",
            )],
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schema_is_valid() {
        let schema = default_schema();
        assert!(schema.validate().is_ok());
        assert_eq!(schema.artifact_name(), "fluid-v2.0.alpha.tar.gz");
        assert_eq!(schema.portals[0].portal_kind().unwrap(), PortalKind::Vuetify);
        assert_eq!(schema.portals[0].slug(), "administration");
    }

    #[test]
    fn personal_fields_are_grouped() {
        let schema = default_schema();
        let admin = &schema.entities[0];
        assert_eq!(admin.fields.len(), 5);
        assert!(
            admin
                .fields
                .iter()
                .all(|f| f.group.as_deref() == Some("Personal Details"))
        );
    }
}
