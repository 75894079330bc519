//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::core::pipeline::exit;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "spw.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing spw-export configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(exit::CONFIG);
        }

        match fs::write(&self.output, Self::sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your directories", self.output);
                println!("  2. Set SPW_MAIL_USERNAME and SPW_MAIL_PASSWORD in the environment or a .env file");
                println!("  3. Validate: spw-export validate-config");
                println!("  4. Run: spw-export run");
                println!();
                Ok(exit::SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(exit::FATAL)
            }
        }
    }

    /// Sample configuration with credential placeholders
    fn sample_config() -> &'static str {
        r#"# spw-export Configuration File
# Daily SPW report normalization and delivery

[application]
log_level = "info"

[extract]
# Directory the upstream job drops the daily extract into
input_dir = "/export/data/ftp/MercuryGate"

[staging]
# Holds exactly one finished report awaiting delivery
dir = "/export/data/ftp/CurrentReport"

[mail]
enabled = true
smtp_host = "smtp.office365.com"
smtp_port = 587

# Credentials come from the environment; never hard-code them here
username = "${SPW_MAIL_USERNAME}"
password = "${SPW_MAIL_PASSWORD}"

from = "it@example.com"
to = ["ops@example.com"]
subject_prefix = "SPW Report"

[logging]
local_enabled = true
local_path = "/var/log/spw-export"
local_rotation = "daily"
local_max_size_mb = 100
"#
    }
}
