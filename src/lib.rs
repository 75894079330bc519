// spw-export - Daily SPW Report Pipeline
// Licensed under the MIT License

//! # spw-export - Daily SPW Report Pipeline
//!
//! spw-export is an unattended batch tool that waits for the upstream SPW
//! extract to appear, normalizes it into the partner-mandated report layout,
//! stages exactly one finished file, and delivers it by email.
//!
//! ## Pipeline
//!
//! One run moves through a fixed sequence of synchronous stages:
//!
//! 1. **Clear** the staging slot so at most one report exists between runs
//! 2. **Gate** on freshness: abort if today's extract never landed
//! 3. **Normalize** columns (`SKIP` rename, reference backfill)
//! 4. **Format** the four date columns as `M/D/YYYY`, blanks stay empty
//! 5. **Stage** the all-string report under the extract's base name
//! 6. **Deliver** it as an email attachment over STARTTLS submission
//!
//! Staleness and write failures abort the run with a non-zero exit; a failed
//! delivery still exits zero because the report remains correctly staged for
//! a manual resend.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (staging, freshness, transform, pipeline)
//! - [`adapters`] - External integrations (xlsx read/write, SMTP)
//! - [`domain`] - Core domain types and the error hierarchy
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use spw_export::config::load_config;
//! use spw_export::core::pipeline::RunCoordinator;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("spw.toml")?;
//!     let outcome = RunCoordinator::new(config).execute()?;
//!     println!("Staged: {}", outcome.staged().display());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::SpwError`]; the coordinator maps
//! fatal variants to distinct exit codes and contains the non-fatal ones
//! (staging-clear and delivery failures) by logging them.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
