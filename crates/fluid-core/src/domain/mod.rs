// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Fluid.
//!
//! This module contains pure business logic with no I/O. Fetching,
//! archiving, rendering and formatting are handled via ports (traits)
//! defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Few crates**: std + thiserror + serde (for the schema document)
//! - **Immutable entities**: All domain objects are Clone + PartialEq
//!
// Public API - what the world sees
pub mod casing;
pub mod entities;
pub mod error;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    generated_file::GeneratedFile,
    release::{LATEST, ReleaseInfo, TemplateKind, TemplateRepository},
    schema::{Contract, Entity, EntityAction, Field, Portal, PortalKind, ProjectSchema, Theme},
};

pub use error::{DomainError, ErrorCategory, ReleaseError};

pub use entities::common::RelativePath;
pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portal_slug_follows_kebab_rules() {
        let portal = Portal::new("Customer Portal", "ionic");
        assert_eq!(portal.slug(), "customer-portal");
        assert_eq!(portal.portal_kind().unwrap(), PortalKind::Ionic);
    }

    #[test]
    fn template_kind_for_each_portal_kind() {
        let slugs: Vec<_> = PortalKind::ALL
            .into_iter()
            .map(|k| TemplateKind::Portal(k).slug())
            .collect();
        assert_eq!(slugs, ["portal-ionic", "portal-vuetify"]);
    }

    #[test]
    fn validator_delegates_to_schema() {
        let schema = ProjectSchema::new("", "1.0.0");
        assert!(DomainValidator::validate_schema(&schema).is_err());
        assert!(DomainValidator::validate_schema(&ProjectSchema::new("Fluid", "1.0.0")).is_ok());
    }
}
