//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the spw-export configuration file.

use crate::config::load_config;
use crate::core::pipeline::exit;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates after parsing
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(exit::CONFIG);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Extract Directory: {}", config.extract.input_dir);
        println!("  Staging Directory: {}", config.staging.dir);
        if config.mail.enabled {
            println!("  Mail: {}:{}", config.mail.smtp_host, config.mail.smtp_port);
            println!("  From: {}", config.mail.from);
            println!("  To: {}", config.mail.to.join(", "));
            println!("  Subject Prefix: {}", config.mail.subject_prefix);
        } else {
            println!("  Mail: disabled");
        }
        println!();
        Ok(exit::SUCCESS)
    }
}
