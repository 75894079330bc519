//! Run command implementation
//!
//! This module implements the `run` command: one full pipeline run, from
//! staging-slot clear through delivery, mapping failures to exit codes.

use crate::config::load_config;
use crate::core::pipeline::{exit, exit_code_for, RunCoordinator, RunOutcome};
use clap::Args;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Stage the report without sending the email
    #[arg(long)]
    pub no_email: bool,

    /// Override the extract input directory
    #[arg(long)]
    pub input_dir: Option<String>,

    /// Override the staging directory
    #[arg(long)]
    pub staging_dir: Option<String>,
}

impl RunArgs {
    /// Execute the run command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting report run");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(exit::CONFIG);
            }
        };

        // Apply CLI overrides
        if let Some(dir) = &self.input_dir {
            tracing::info!(input_dir = %dir, "Overriding extract input directory from CLI");
            config.extract.input_dir = dir.clone();
        }
        if let Some(dir) = &self.staging_dir {
            tracing::info!(staging_dir = %dir, "Overriding staging directory from CLI");
            config.staging.dir = dir.clone();
        }

        let coordinator = RunCoordinator::new(config).with_delivery_skipped(self.no_email);

        match coordinator.execute() {
            Ok(RunOutcome::Delivered { staged }) => {
                println!("Report staged at {} and delivered", staged.display());
                Ok(exit::SUCCESS)
            }
            Ok(RunOutcome::DeliveryFailed { staged }) => {
                // Still a successful run: the artifact is staged for a manual resend
                println!(
                    "Report staged at {} but delivery failed; see log, resend manually",
                    staged.display()
                );
                Ok(exit::SUCCESS)
            }
            Ok(RunOutcome::DeliverySkipped { staged }) => {
                println!("Report staged at {} (delivery skipped)", staged.display());
                Ok(exit::SUCCESS)
            }
            Err(e) => {
                tracing::error!(error = %e, "Run aborted");
                eprintln!("Run aborted: {e}");
                Ok(exit_code_for(&e))
            }
        }
    }
}
