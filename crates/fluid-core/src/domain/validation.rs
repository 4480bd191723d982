use crate::domain::{
    entities::{ProjectSchema, ReleaseInfo},
    error::{DomainError, ReleaseError},
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_schema(schema: &ProjectSchema) -> Result<(), DomainError> {
        schema.validate()
    }

    pub fn validate_release(body: &[u8]) -> Result<ReleaseInfo, ReleaseError> {
        ReleaseInfo::from_json(body)
    }
}
