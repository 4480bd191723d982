//! Integration tests for the `fluid` binary.
//!
//! Every test runs against its own config file and cache directory, and
//! either stays offline or never reaches the network.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use predicates::prelude::*;
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let sandbox = Self {
            dir: TempDir::new().unwrap(),
        };
        fs::create_dir_all(sandbox.cache()).unwrap();
        fs::write(
            sandbox.config(),
            format!(
                "[cache]\nroot = '{}'\n\n[build]\noutput_dir = '{}'\n\n[formatter]\ncommand = ''\n",
                sandbox.cache().display(),
                sandbox.out().display(),
            ),
        )
        .unwrap();
        sandbox
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn cache(&self) -> PathBuf {
        self.path().join("cache")
    }

    fn out(&self) -> PathBuf {
        self.path().join("out")
    }

    fn config(&self) -> PathBuf {
        self.path().join("fluid.toml")
    }

    fn fluid(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("fluid");
        cmd.current_dir(self.path())
            .arg("--config")
            .arg(self.config())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Lay out a synchronised cache by hand: one `v1` tree per template and
    /// a `latest` link to it.
    #[cfg(unix)]
    fn seed_cache(&self) {
        for slug in ["api", "logic", "portal-ionic", "portal-vuetify"] {
            let tag_dir = self.cache().join(slug).join("v1");
            fs::create_dir_all(&tag_dir).unwrap();
            fs::write(tag_dir.join("README.md"), format!("{slug}\n")).unwrap();
            std::os::unix::fs::symlink("v1", self.cache().join(slug).join("latest")).unwrap();
        }
    }
}

// ── help & version ────────────────────────────────────────────────────────────

#[test]
fn help_flag() {
    cargo_bin_cmd!("fluid")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema-driven project generator"))
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("sync"));
}

#[test]
fn version_flag() {
    cargo_bin_cmd!("fluid")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn quiet_and_verbose_are_rejected_together() {
    cargo_bin_cmd!("fluid")
        .args(["--quiet", "--verbose", "sync"])
        .assert()
        .code(2);
}

#[test]
fn completions_mention_binary() {
    cargo_bin_cmd!("fluid")
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fluid"));
}

// ── schema ────────────────────────────────────────────────────────────────────

#[test]
fn schema_prints_built_in_blueprint() {
    let sandbox = Sandbox::new();
    sandbox
        .fluid()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("name = \"Fluid\""))
        .stdout(predicate::str::contains("Administrator"));
}

#[test]
fn schema_as_json_is_parseable() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .fluid()
        .args(["schema", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["version"], "v2.0.alpha");
    assert_eq!(value["portals"][0]["type"], "vuetify");
}

#[test]
fn schema_file_round_trips_through_cli() {
    let sandbox = Sandbox::new();
    let path = sandbox.write(
        "shop.json",
        r#"{"name":"Shop","version":"1.0.0","entities":[{"nameSingular":"Order","namePlural":"Orders","fields":[]}]}"#,
    );
    sandbox
        .fluid()
        .args(["schema", "--schema"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("name_singular = \"Order\""));
}

#[test]
fn missing_schema_file_exits_not_found() {
    let sandbox = Sandbox::new();
    sandbox
        .fluid()
        .args(["schema", "--schema", "missing.toml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Schema file not found"));
}

// ── config & init ─────────────────────────────────────────────────────────────

#[test]
fn config_get_reads_file_values() {
    let sandbox = Sandbox::new();
    sandbox
        .fluid()
        .args(["config", "get", "cache.root"])
        .assert()
        .success()
        .stdout(predicate::str::contains(sandbox.cache().display().to_string()));
}

#[test]
fn config_get_unknown_key_is_configuration_error() {
    let sandbox = Sandbox::new();
    sandbox
        .fluid()
        .args(["config", "get", "cache.nope"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn config_path_reports_explicit_file() {
    let sandbox = Sandbox::new();
    sandbox
        .fluid()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fluid.toml"));
}

#[test]
fn missing_explicit_config_is_configuration_error() {
    let sandbox = Sandbox::new();
    cargo_bin_cmd!("fluid")
        .current_dir(sandbox.path())
        .args(["--config", "absent.toml", "config", "list"])
        .assert()
        .code(4);
}

#[test]
fn init_writes_once_unless_forced() {
    let sandbox = Sandbox::new();
    let target = sandbox.path().join("nested/config.toml");

    cargo_bin_cmd!("fluid")
        .current_dir(sandbox.path())
        .arg("--config")
        .arg(&target)
        .arg("init")
        .assert()
        .success();
    let written = fs::read_to_string(&target).unwrap();
    assert!(written.contains("[repositories]"));

    fs::write(&target, "# edited\n").unwrap();
    cargo_bin_cmd!("fluid")
        .current_dir(sandbox.path())
        .arg("--config")
        .arg(&target)
        .arg("init")
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&target).unwrap(), "# edited\n");
}

// ── build ─────────────────────────────────────────────────────────────────────

#[test]
fn offline_build_without_cache_points_at_sync() {
    let sandbox = Sandbox::new();
    sandbox
        .fluid()
        .args(["build", "--offline"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("fluid sync"));
    assert!(!sandbox.out().exists());
}

#[test]
fn invalid_schema_is_a_user_error() {
    let sandbox = Sandbox::new();
    let path = sandbox.write("empty.toml", "name = \"\"\nversion = \"1.0.0\"\n");
    sandbox
        .fluid()
        .args(["build", "--offline", "--schema"])
        .arg(&path)
        .assert()
        .code(2);
}

#[cfg(unix)]
#[test]
fn unknown_portal_type_is_configuration_error() {
    let sandbox = Sandbox::new();
    sandbox.seed_cache();
    let path = sandbox.write(
        "kiosk.toml",
        "name = \"Kiosk\"\nversion = \"1.0.0\"\n\n[[portals]]\nname = \"Front\"\ntype = \"flutter\"\n",
    );
    sandbox
        .fluid()
        .args(["build", "--offline", "--schema"])
        .arg(&path)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("flutter"));
    assert!(!sandbox.out().join("kiosk-1.0.0.tar.gz").exists());
}

#[cfg(unix)]
#[test]
fn offline_build_from_seeded_cache() {
    let sandbox = Sandbox::new();
    sandbox.seed_cache();

    sandbox
        .fluid()
        .args(["build", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fluid-v2.0.alpha.tar.gz"));

    let entries: Vec<_> = fs::read_dir(sandbox.out())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("fluid-v2.0.alpha.tar.gz")]);
}

#[cfg(unix)]
#[test]
fn json_output_reports_artifact() {
    let sandbox = Sandbox::new();
    sandbox.seed_cache();

    let output = sandbox
        .fluid()
        .args(["--output-format", "json", "build", "--offline", "-o"])
        .arg(sandbox.path().join("dist"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["project"], "Fluid");
    assert_eq!(summary["entities"], 2);
    assert!(
        summary["artifact"]
            .as_str()
            .unwrap()
            .ends_with("dist/fluid-v2.0.alpha.tar.gz")
    );
}
