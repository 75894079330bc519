//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for spw-export using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// spw-export - daily SPW report normalization and delivery
#[derive(Parser, Debug)]
#[command(name = "spw-export")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "spw.toml", env = "SPW_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SPW_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the daily pipeline: clear staging, verify freshness, normalize, stage, deliver
    Run(commands::run::RunArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
