pub mod common;
pub mod generated_file;
pub mod release;
pub mod schema;

pub use crate::domain::DomainError;
pub use generated_file::GeneratedFile;
pub use release::{ReleaseInfo, TemplateKind, TemplateRepository};
pub use schema::ProjectSchema;
