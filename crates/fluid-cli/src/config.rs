//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `FLUID_<SECTION>__<KEY>`, e.g.
//!    `FLUID_CACHE__ROOT=/var/cache/fluid`
//! 3. Config file: `--config FILE`, or `config.toml` in the platform config dir
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use fluid_core::domain::{PortalKind, TemplateKind, TemplateRepository};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "FLUID";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Local template cache.
    pub cache: CacheConfig,
    /// Release-info endpoint per template.
    pub repositories: RepositoryConfig,
    /// Build inputs and destination.
    pub build: BuildConfig,
    /// Formatting pass over generated sources.
    pub formatter: FormatterConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub root: PathBuf,
    pub metadata_timeout_secs: u64,
    pub download_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    pub api: String,
    pub logic: String,
    pub portal_ionic: String,
    pub portal_vuetify: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub output_dir: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Formatter executable; empty disables formatting.
    pub command: String,
    pub args: Vec<String>,
    /// Treat a formatter failure as a build failure.
    pub strict: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            root: home_dir().join(".cache").join("fluid"),
            metadata_timeout_secs: 2,
            download_timeout_secs: 120,
        }
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            api: "https://api.github.com/repos/go-uniform/base-api/releases/latest".into(),
            logic: "https://api.github.com/repos/go-uniform/base-logic/releases/latest".into(),
            portal_ionic: "https://api.github.com/repos/go-fluid/base-portal-ionic/releases/latest"
                .into(),
            portal_vuetify:
                "https://api.github.com/repos/go-fluid/base-portal-vuetify/releases/latest".into(),
        }
    }
}

impl RepositoryConfig {
    pub fn endpoint(&self, kind: TemplateKind) -> &str {
        match kind {
            TemplateKind::Api => &self.api,
            TemplateKind::Logic => &self.logic,
            TemplateKind::Portal(PortalKind::Ionic) => &self.portal_ionic,
            TemplateKind::Portal(PortalKind::Vuetify) => &self.portal_vuetify,
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: dirs::download_dir().unwrap_or_else(|| home_dir().join("Downloads")),
            schema: None,
        }
    }
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            command: "gofmt".into(),
            args: vec!["-s".into(), "-w".into()],
            strict: false,
        }
    }
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home_dir().join(rest),
        Err(_) => path.to_path_buf(),
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then `FLUID_*`
    /// environment variables.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let defaults = config::Config::try_from(&Self::default())
            .context("Failed to serialise default configuration")?;

        let file = match config_file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::from(Self::config_path()).required(false),
        };

        let environment = config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(" ")
            .with_list_parse_key("formatter.args");

        let mut loaded: Self = config::Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(environment)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        loaded.cache.root = expand_home(&loaded.cache.root);
        loaded.build.output_dir = expand_home(&loaded.build.output_dir);
        loaded.build.schema = loaded.build.schema.as_deref().map(expand_home);
        Ok(loaded)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.fluid.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("io", "fluid", "fluid")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".fluid.toml"))
    }

    /// The template repositories, rooted at the configured cache.
    pub fn repositories(&self) -> Vec<TemplateRepository> {
        TemplateKind::ALL
            .into_iter()
            .map(|kind| {
                TemplateRepository::new(kind, self.repositories.endpoint(kind), &self.cache.root)
            })
            .collect()
    }

    pub fn metadata_timeout(&self) -> Duration {
        Duration::from_secs(self.cache.metadata_timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.cache.download_timeout_secs)
    }

    /// Look up a dotted key such as `cache.root`. Tables are returned as
    /// TOML, scalars as their plain value.
    pub fn get(&self, key: &str) -> Option<String> {
        let tree = serde_json::to_value(self).ok()?;
        let value = key
            .split('.')
            .try_fold(&tree, |node, part| node.get(part))?;

        match value {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => toml::to_string_pretty(value).ok(),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_point_at_upstream_templates() {
        let cfg = AppConfig::default();
        assert!(cfg.repositories.api.ends_with("go-uniform/base-api/releases/latest"));
        assert_eq!(cfg.cache.metadata_timeout_secs, 2);
        assert_eq!(cfg.cache.download_timeout_secs, 120);
        assert!(cfg.cache.root.ends_with(".cache/fluid"));
        assert_eq!(cfg.formatter.command, "gofmt");
        assert!(!cfg.formatter.strict);
    }

    #[test]
    fn repositories_cover_every_template() {
        let cfg = AppConfig::default();
        let repos = cfg.repositories();
        assert_eq!(repos.len(), 4);
        assert_eq!(repos[2].cache_dir(), cfg.cache.root.join("portal-ionic"));
        assert!(repos[3].endpoint().contains("base-portal-vuetify"));
    }

    #[test]
    fn file_values_override_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fluid.toml");
        fs::write(
            &path,
            r#"
[cache]
root = "/srv/fluid-cache"
download_timeout_secs = 30

[formatter]
command = ""
"#,
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.cache.root, PathBuf::from("/srv/fluid-cache"));
        assert_eq!(cfg.download_timeout(), Duration::from_secs(30));
        assert_eq!(cfg.metadata_timeout(), Duration::from_secs(2));
        assert!(cfg.formatter.command.is_empty());
        assert_eq!(cfg.repositories, RepositoryConfig::default());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(AppConfig::load(Some(&tmp.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn tilde_is_expanded() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fluid.toml");
        fs::write(&path, "[build]\noutput_dir = \"~/builds\"\n").unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.build.output_dir, home_dir().join("builds"));
    }

    #[test]
    fn get_walks_dotted_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("cache.metadata_timeout_secs").as_deref(), Some("2"));
        assert_eq!(cfg.get("formatter.strict").as_deref(), Some("false"));
        assert_eq!(cfg.get("formatter.command").as_deref(), Some("gofmt"));
        assert!(cfg.get("repositories").unwrap().contains("portal_ionic"));
        assert_eq!(cfg.get("does.not.exist"), None);
    }

    #[test]
    fn defaults_serialise_as_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(text.contains("[cache]"));
        assert!(!text.contains("schema"));
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, AppConfig::default());
    }
}
