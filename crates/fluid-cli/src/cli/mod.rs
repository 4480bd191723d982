//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use fluid_adapters::SchemaFormat;

pub mod global;
pub use global::{GlobalArgs, LogFormat, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "fluid",
    bin_name = "fluid",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Schema-driven project generator",
    long_about = "Fluid keeps a local cache of upstream api, logic and portal \
                  templates and assembles them, together with code generated \
                  from a project schema, into a single project archive.",
    after_help = "EXAMPLES:\n\
        \x20 fluid                               # sync templates, build the configured schema\n\
        \x20 fluid build --schema shop.toml --output dist\n\
        \x20 fluid sync\n\
        \x20 fluid schema --format json > fluid.json\n\
        \x20 fluid completions bash > /usr/share/bash-completion/completions/fluid",
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute; `build` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The command to run, defaulting to a plain `build`.
    pub fn command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Build(BuildArgs::default()))
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Synchronise templates and build a project archive.
    #[command(
        visible_alias = "b",
        about = "Sync templates and build a project archive",
        after_help = "EXAMPLES:\n\
            \x20 fluid build\n\
            \x20 fluid build --schema shop.toml\n\
            \x20 fluid build --offline --output ./dist"
    )]
    Build(BuildArgs),

    /// Synchronise the template caches only.
    #[command(about = "Synchronise template caches")]
    Sync,

    /// Print the resolved project schema.
    #[command(
        about = "Print the project schema blueprint",
        after_help = "EXAMPLES:\n\
            \x20 fluid schema\n\
            \x20 fluid schema --format json > fluid.json"
    )]
    Schema(SchemaArgs),

    /// Initialise a Fluid configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 fluid init                      # platform config location\n\
            \x20 fluid --config ./fluid-config.toml init\n\
            \x20 fluid init --force              # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 fluid completions bash > ~/.local/share/bash-completion/completions/fluid\n\
            \x20 fluid completions zsh  > ~/.zfunc/_fluid\n\
            \x20 fluid completions fish > ~/.config/fish/completions/fluid.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Fluid configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 fluid config get cache.root\n\
            \x20 fluid config list\n\
            \x20 fluid config path"
    )]
    Config(ConfigCommands),
}

// ── build ─────────────────────────────────────────────────────────────────────

/// Arguments for `fluid build`.
#[derive(Debug, Clone, Default, Args)]
pub struct BuildArgs {
    /// Schema document to build (`.toml` or `.json`).
    #[arg(
        short = 's',
        long = "schema",
        value_name = "FILE",
        help = "Schema document (default: configured or built-in schema)"
    )]
    pub schema: Option<PathBuf>,

    /// Directory receiving the archive.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: configured downloads directory)"
    )]
    pub output: Option<PathBuf>,

    /// Build from the cached templates without contacting upstream.
    #[arg(long = "offline", help = "Skip template synchronisation")]
    pub offline: bool,
}

// ── schema ────────────────────────────────────────────────────────────────────

/// Arguments for `fluid schema`.
#[derive(Debug, Clone, Args)]
pub struct SchemaArgs {
    /// Schema document to print instead of the configured one.
    #[arg(short = 's', long = "schema", value_name = "FILE", help = "Schema document")]
    pub schema: Option<PathBuf>,

    /// Output document format.
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "toml",
        help = "Document format"
    )]
    pub format: DocumentFormat,
}

/// Schema document format accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocumentFormat {
    Toml,
    Json,
}

impl From<DocumentFormat> for SchemaFormat {
    fn from(format: DocumentFormat) -> Self {
        match format {
            DocumentFormat::Toml => SchemaFormat::Toml,
            DocumentFormat::Json => SchemaFormat::Json,
        }
    }
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `fluid init`.
#[derive(Debug, Clone, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `fluid completions`.
#[derive(Debug, Clone, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `fluid config`.
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `cache.root`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn no_subcommand_means_build() {
        let cli = Cli::parse_from(["fluid"]);
        assert!(cli.command.is_none());
        match cli.command() {
            Commands::Build(args) => {
                assert!(args.schema.is_none());
                assert!(!args.offline);
            }
            other => panic!("expected build, got {other:?}"),
        }
    }

    #[test]
    fn parse_build_command() {
        let cli = Cli::parse_from([
            "fluid", "build", "--schema", "shop.toml", "-o", "dist", "--offline",
        ]);
        let Commands::Build(args) = cli.command() else {
            panic!("expected build command");
        };
        assert_eq!(args.schema, Some(PathBuf::from("shop.toml")));
        assert_eq!(args.output, Some(PathBuf::from("dist")));
        assert!(args.offline);
    }

    #[test]
    fn build_alias() {
        let cli = Cli::parse_from(["fluid", "b", "--offline"]);
        assert!(matches!(cli.command(), Commands::Build(BuildArgs { offline: true, .. })));
    }

    #[test]
    fn schema_format_defaults_to_toml() {
        let cli = Cli::parse_from(["fluid", "schema"]);
        let Commands::Schema(args) = cli.command() else {
            panic!("expected schema command");
        };
        assert_eq!(SchemaFormat::from(args.format), SchemaFormat::Toml);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["fluid", "sync", "-vv", "--log-format", "json"]);
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.log_format, LogFormat::Json);
        assert!(matches!(cli.command(), Commands::Sync));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["fluid", "--quiet", "--verbose", "sync"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_set_is_not_a_subcommand() {
        let result = Cli::try_parse_from(["fluid", "config", "set", "cache.root", "/tmp"]);
        assert!(result.is_err());
    }
}
