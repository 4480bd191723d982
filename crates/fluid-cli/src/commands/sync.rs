//! `fluid sync`: bring every template cache up to date.

use fluid_core::application::{SyncOutcome, SyncReport, SyncStatus};
use serde::Serialize;
use tracing::instrument;

use crate::{config::AppConfig, error::CliResult, output::OutputManager};

/// One line of the machine-readable sync report.
#[derive(Debug, Serialize)]
struct SyncLine {
    template: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl SyncLine {
    fn new(template: String, status: &SyncStatus) -> Self {
        let (status, tag, reason) = match status {
            SyncStatus::Synced(SyncOutcome::Downloaded { tag }) => {
                ("downloaded", Some(tag.clone()), None)
            }
            SyncStatus::Synced(SyncOutcome::UpToDate { tag }) => {
                ("up-to-date", Some(tag.clone()), None)
            }
            SyncStatus::Skipped { reason } => ("skipped", None, Some(reason.clone())),
        };
        Self {
            template,
            status,
            tag,
            reason,
        }
    }
}

pub fn execute(config: AppConfig, output: OutputManager) -> CliResult<()> {
    let report = run(&config, &output)?;
    let lines: Vec<SyncLine> = report
        .entries
        .iter()
        .map(|(kind, status)| SyncLine::new(kind.to_string(), status))
        .collect();
    output.json(&lines)?;
    Ok(())
}

/// Synchronise all caches, reporting one line per template.
#[instrument(skip_all, fields(cache = %config.cache.root.display()))]
pub(crate) fn run(config: &AppConfig, output: &OutputManager) -> CliResult<SyncReport> {
    let spinner = output.spinner("Synchronising templates...");
    let result = super::cache_service(config).sync(&config.repositories());
    spinner.finish_and_clear();
    let report = result?;

    for (kind, status) in &report.entries {
        let line = format!("{kind}: {status}");
        match status {
            SyncStatus::Synced(SyncOutcome::Downloaded { .. }) => output.success(&line)?,
            SyncStatus::Synced(SyncOutcome::UpToDate { .. }) => output.info(&line)?,
            SyncStatus::Skipped { .. } => output.warning(&line)?,
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_carry_tag_or_reason() {
        let downloaded = SyncLine::new(
            "api".into(),
            &SyncStatus::Synced(SyncOutcome::Downloaded { tag: "v1.2.0".into() }),
        );
        assert_eq!(
            serde_json::to_string(&downloaded).unwrap(),
            r#"{"template":"api","status":"downloaded","tag":"v1.2.0"}"#
        );

        let skipped = SyncLine::new(
            "logic".into(),
            &SyncStatus::Skipped {
                reason: "timed out".into(),
            },
        );
        assert_eq!(
            serde_json::to_string(&skipped).unwrap(),
            r#"{"template":"logic","status":"skipped","reason":"timed out"}"#
        );
    }
}
