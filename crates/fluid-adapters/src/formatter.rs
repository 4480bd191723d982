//! Formatting pass over generated sources.

use std::io;
use std::path::Path;
use std::process::Command;

use fluid_core::{
    application::{ApplicationError, ports::CodeFormatter},
    error::FluidResult,
};
use tracing::debug;

/// Runs an external formatter as `<command> <args...> <dir>`.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    command: String,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    /// `gofmt -s -w`, the formatter for the generated Go sources.
    pub fn gofmt() -> Self {
        Self::new("gofmt", vec!["-s".into(), "-w".into()])
    }

    fn failed(&self, reason: impl Into<String>) -> ApplicationError {
        ApplicationError::FormatterFailed {
            command: self.command.clone(),
            reason: reason.into(),
        }
    }
}

impl CodeFormatter for CommandFormatter {
    fn format(&self, dir: &Path) -> FluidResult<()> {
        debug!(command = %self.command, dir = %dir.display(), "Formatting sources");
        let output = Command::new(&self.command)
            .args(&self.args)
            .arg(dir)
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => self.failed("command not found"),
                _ => self.failed(e.to_string()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self
                .failed(format!("{} ({})", stderr.trim(), output.status))
                .into());
        }
        Ok(())
    }
}

/// Leaves generated sources untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFormatter;

impl CodeFormatter for NoopFormatter {
    fn format(&self, _dir: &Path) -> FluidResult<()> {
        Ok(())
    }
}
