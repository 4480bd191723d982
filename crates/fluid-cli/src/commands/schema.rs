//! `fluid schema`: print the schema a build would use.

use fluid_adapters::SchemaLoader;

use crate::{cli::SchemaArgs, config::AppConfig, error::CliResult, output::OutputManager};

pub fn execute(args: SchemaArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let schema = super::resolve_schema(args.schema.as_deref(), &config)?;
    let document = SchemaLoader::to_string(&schema, args.format.into())?;
    output.emit(document.trim_end())?;
    Ok(())
}
