//! `fluid build`: sync templates, then assemble the project archive.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    cli::BuildArgs,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct BuildSummary<'a> {
    project: &'a str,
    version: &'a str,
    artifact: PathBuf,
    entities: usize,
    contracts: usize,
    portals: usize,
}

/// Execute the `fluid build` command.
///
/// The schema is resolved before any network traffic so that a bad schema
/// path fails fast.
#[instrument(skip_all, fields(offline = args.offline))]
pub fn execute(args: BuildArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let schema = super::resolve_schema(args.schema.as_deref(), &config)?;
    let output_dir = args
        .output
        .unwrap_or_else(|| config.build.output_dir.clone());

    if args.offline {
        output.info("Offline: building from cached templates")?;
    } else {
        super::sync::run(&config, &output)?;
    }

    let service = super::build_service(&config)?;
    output.header(&format!("Building '{}' {}...", schema.name, schema.version))?;

    let spinner = output.spinner(&format!("Generating {}", schema.artifact_name()));
    let result = service.build(&schema, &output_dir);
    spinner.finish_and_clear();
    let artifact = result?;

    info!(artifact = %artifact.display(), "Build completed");
    output.success(&format!("Project archive written to {}", artifact.display()))?;
    output.json(&BuildSummary {
        project: &schema.name,
        version: &schema.version,
        artifact,
        entities: schema.entities.len(),
        contracts: schema.contracts.len(),
        portals: schema.portals.len(),
    })?;
    Ok(())
}
