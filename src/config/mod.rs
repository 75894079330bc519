//! Configuration management for spw-export.
//!
//! TOML-based configuration loading, parsing, and validation with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `SPW_*` environment variable overrides
//! - Default values for optional settings
//! - Secret-wrapped mail credentials
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [extract]
//! input_dir = "/export/data/ftp/MercuryGate"
//!
//! [staging]
//! dir = "/export/data/ftp/CurrentReport"
//!
//! [mail]
//! smtp_host = "smtp.office365.com"
//! smtp_port = 587
//! username = "${SPW_MAIL_USERNAME}"
//! password = "${SPW_MAIL_PASSWORD}"
//! from = "it@example.com"
//! to = ["ops@example.com"]
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, ExtractConfig, LoggingConfig, MailConfig, SpwConfig, StagingConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
