//! Run coordinator - orchestrates the daily report pipeline
//!
//! Sequences the stages synchronously: clear the staging slot, gate on
//! freshness, read and revise the extract, stage the report, deliver it.
//! Each stage must complete before the next begins, and the coordinator maps
//! stage failures to process exit behavior: staleness and write failures are
//! fatal, staging-clear and delivery failures are logged and contained.

use crate::adapters::extract::read_extract;
use crate::adapters::mail::send_report;
use crate::adapters::spreadsheet::write_report;
use crate::config::SpwConfig;
use crate::core::freshness::FreshnessGate;
use crate::core::staging::StagingManager;
use crate::core::transform::revise;
use crate::domain::errors::SpwError;
use crate::domain::result::Result;
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

/// Process exit codes
///
/// Zero covers every terminal-success state, delivery failure included: once
/// the report is staged the run has done its job, and an operator can resend
/// manually. Distinct non-zero codes let the scheduler tell a missing upstream
/// extract from a staging failure.
pub mod exit {
    /// Report staged (and delivered, or delivery failed/skipped)
    pub const SUCCESS: i32 = 0;
    /// Configuration could not be loaded or validated
    pub const CONFIG: i32 = 2;
    /// Today's extract is missing, stale, or ambiguous
    pub const STALE: i32 = 3;
    /// The report could not be written to the staging slot
    pub const WRITE: i32 = 4;
    /// Unexpected fatal error
    pub const FATAL: i32 = 5;
}

/// Terminal-success state of a run
///
/// All variants exit zero: staging succeeded, which is the run's contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Report staged and the email was accepted by the submission server
    Delivered { staged: PathBuf },
    /// Report staged but the email could not be sent; resend manually
    DeliveryFailed { staged: PathBuf },
    /// Report staged; delivery disabled or skipped by the operator
    DeliverySkipped { staged: PathBuf },
}

impl RunOutcome {
    /// Path of the staged report
    pub fn staged(&self) -> &Path {
        match self {
            RunOutcome::Delivered { staged }
            | RunOutcome::DeliveryFailed { staged }
            | RunOutcome::DeliverySkipped { staged } => staged,
        }
    }
}

/// Map a fatal pipeline error to its process exit code
pub fn exit_code_for(err: &SpwError) -> i32 {
    match err {
        SpwError::Configuration(_) => exit::CONFIG,
        SpwError::Freshness(_) => exit::STALE,
        SpwError::Write(_) => exit::WRITE,
        _ => exit::FATAL,
    }
}

/// Orchestrates one pipeline run
///
/// Configuration is passed in at construction; nothing is read from ambient
/// globals, so runs are reproducible in tests with sandbox directories.
pub struct RunCoordinator {
    config: SpwConfig,
    staging: StagingManager,
    gate: FreshnessGate,
    today: NaiveDate,
    skip_delivery: bool,
}

impl RunCoordinator {
    /// Create a coordinator for today's run
    pub fn new(config: SpwConfig) -> Self {
        Self {
            config,
            staging: StagingManager::new(),
            gate: FreshnessGate::new(),
            today: Local::now().date_naive(),
            skip_delivery: false,
        }
    }

    /// Override the reference date the freshness gate compares against
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Stage the report without emailing it
    pub fn with_delivery_skipped(mut self, skip: bool) -> Self {
        self.skip_delivery = skip;
        self
    }

    /// Execute the pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error only for fatal conditions (stale extract, read or
    /// transform failure, write failure). Delivery failures are contained and
    /// reported through [`RunOutcome::DeliveryFailed`].
    pub fn execute(&self) -> Result<RunOutcome> {
        let staging_dir = Path::new(&self.config.staging.dir);
        let extract_dir = Path::new(&self.config.extract.input_dir);

        // Clear the slot first so a leftover report can never be re-sent.
        // Removal failures are non-fatal; the write below adds to what remains.
        let cleared = self.staging.clear(staging_dir);
        if cleared.failed > 0 {
            tracing::warn!(
                failed = cleared.failed,
                "Staging slot not fully cleared; continuing"
            );
        }

        // Fatal when stale: the upstream job did not run today
        let extract_path = self.gate.check(extract_dir, self.today)?;

        let table = read_extract(&extract_path)?;
        let report = revise(table)?;

        // The staged file keeps the source extract's base name
        let file_name = extract_path
            .file_name()
            .ok_or_else(|| SpwError::Extract("Extract path has no file name".to_string()))?;
        let staged = staging_dir.join(file_name);
        write_report(&report, &staged)?;

        if self.skip_delivery {
            tracing::info!(staged = %staged.display(), "Delivery skipped by operator");
            return Ok(RunOutcome::DeliverySkipped { staged });
        }
        if !self.config.mail.enabled {
            tracing::info!(staged = %staged.display(), "Mail delivery disabled in configuration");
            return Ok(RunOutcome::DeliverySkipped { staged });
        }

        match send_report(&self.config.mail, &staged, report.report_date()) {
            Ok(()) => {
                tracing::info!(
                    staged = %staged.display(),
                    report_date = report.report_date(),
                    "Report delivered"
                );
                Ok(RunOutcome::Delivered { staged })
            }
            Err(e) => {
                // Non-fatal: the report is correctly staged, a human can
                // resend from the staging slot
                tracing::error!(
                    error = %e,
                    detail = ?e,
                    staged = %staged.display(),
                    "Delivery failed; report remains staged"
                );
                Ok(RunOutcome::DeliveryFailed { staged })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{DeliveryError, FreshnessError};

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(
            exit_code_for(&SpwError::Configuration("bad".to_string())),
            exit::CONFIG
        );
        assert_eq!(
            exit_code_for(&SpwError::Freshness(FreshnessError::NoExtract(
                "/dir".to_string()
            ))),
            exit::STALE
        );
        assert_eq!(
            exit_code_for(&SpwError::Write("disk full".to_string())),
            exit::WRITE
        );
        assert_eq!(
            exit_code_for(&SpwError::Transform("missing column".to_string())),
            exit::FATAL
        );
        assert_eq!(
            exit_code_for(&SpwError::Delivery(DeliveryError::Transport(
                "refused".to_string()
            ))),
            exit::FATAL
        );
    }

    #[test]
    fn test_run_outcome_staged_path() {
        let outcome = RunOutcome::DeliveryFailed {
            staged: PathBuf::from("/staging/report.xlsx"),
        };
        assert_eq!(outcome.staged(), Path::new("/staging/report.xlsx"));
    }
}
