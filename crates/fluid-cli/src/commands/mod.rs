//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments and configuration into adapter instances,
//! call the core services and report results. No business logic lives here.

use std::path::Path;
use std::sync::Arc;

use fluid_adapters::{
    CommandFormatter, LocalFilesystem, NoopFormatter, SchemaLoader, TarGzArchiver, TeraRenderer,
    UreqFetcher, default_schema,
};
use fluid_core::{
    application::{BuildService, CodeFormatter, CodeGenerator, TemplateCacheService},
    domain::ProjectSchema,
};
use tracing::debug;

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
};

pub mod build;
pub mod completions;
pub mod config;
pub mod init;
pub mod schema;
pub mod sync;

/// Schema to work on: the explicit file, else the configured file, else
/// the built-in schema.
pub(crate) fn resolve_schema(explicit: Option<&Path>, config: &AppConfig) -> CliResult<ProjectSchema> {
    let Some(path) = explicit.or(config.build.schema.as_deref()) else {
        debug!("Using built-in schema");
        return Ok(default_schema());
    };
    if !path.is_file() {
        return Err(CliError::SchemaNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(SchemaLoader::load(path)?)
}

pub(crate) fn cache_service(config: &AppConfig) -> TemplateCacheService {
    TemplateCacheService::new(
        Box::new(UreqFetcher::new()),
        Arc::new(LocalFilesystem::new()),
        Arc::new(TarGzArchiver::new()),
    )
    .with_timeouts(config.metadata_timeout(), config.download_timeout())
}

pub(crate) fn build_service(config: &AppConfig) -> CliResult<BuildService> {
    let filesystem = Arc::new(LocalFilesystem::new());
    let formatter: Box<dyn CodeFormatter> = if config.formatter.command.is_empty() {
        Box::new(NoopFormatter)
    } else {
        Box::new(CommandFormatter::new(
            config.formatter.command.clone(),
            config.formatter.args.clone(),
        ))
    };
    let generator = CodeGenerator::new(Box::new(TeraRenderer::new()?), filesystem.clone(), formatter)
        .with_strict_formatting(config.formatter.strict);

    Ok(BuildService::new(
        config.repositories(),
        filesystem,
        Arc::new(TarGzArchiver::new()),
        generator,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn built_in_schema_when_nothing_configured() {
        let schema = resolve_schema(None, &AppConfig::default()).unwrap();
        assert_eq!(schema, default_schema());
    }

    #[test]
    fn explicit_schema_wins_over_configured() {
        let tmp = TempDir::new().unwrap();
        let explicit = tmp.path().join("shop.toml");
        fs::write(&explicit, "name = \"Shop\"\nversion = \"1.0.0\"\n").unwrap();

        let mut config = AppConfig::default();
        config.build.schema = Some(tmp.path().join("configured.toml"));

        let schema = resolve_schema(Some(&explicit), &config).unwrap();
        assert_eq!(schema.name, "Shop");
    }

    #[test]
    fn missing_configured_schema_is_not_found() {
        let mut config = AppConfig::default();
        config.build.schema = Some("/no/such/fluid.toml".into());
        assert!(matches!(
            resolve_schema(None, &config),
            Err(CliError::SchemaNotFound { .. })
        ));
    }

    #[test]
    fn services_wire_from_default_config() {
        let config = AppConfig::default();
        assert!(build_service(&config).is_ok());
        let _ = cache_service(&config);
    }
}
