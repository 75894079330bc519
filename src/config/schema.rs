//! Configuration schema types
//!
//! This module defines the configuration structure that maps to the TOML file.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Main spw-export configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Serialize, Deserialize)]
pub struct SpwConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Upstream extract settings
    pub extract: ExtractConfig,

    /// Staging slot settings
    pub staging: StagingConfig,

    /// Mail delivery settings
    pub mail: MailConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SpwConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.extract.validate()?;
        self.staging.validate()?;
        self.mail.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Upstream extract configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Directory the upstream job drops extract files into
    pub input_dir: String,
}

impl ExtractConfig {
    fn validate(&self) -> Result<(), String> {
        if self.input_dir.is_empty() {
            return Err("extract.input_dir cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Staging slot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagingConfig {
    /// Directory holding the single finished report awaiting delivery
    pub dir: String,
}

impl StagingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.dir.is_empty() {
            return Err("staging.dir cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Mail delivery configuration
///
/// Credentials are supplied through the configuration/secret source (env
/// substitution or a `.env` file), never hard-coded. The password is held as a
/// [`SecretString`] and redacted from Debug output.
#[derive(Debug, Serialize, Deserialize)]
pub struct MailConfig {
    /// Whether to deliver the staged report by email
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// SMTP submission host
    pub smtp_host: String,

    /// SMTP submission port (STARTTLS)
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// Login account for the submission server
    #[serde(default)]
    pub username: Option<String>,

    /// Login password, zeroized on drop
    #[serde(default)]
    pub password: Option<SecretString>,

    /// Fixed sender address
    pub from: String,

    /// Fixed recipient list
    #[serde(default)]
    pub to: Vec<String>,

    /// Subject prefix; the report date is appended per run
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,
}

impl MailConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.enabled {
            return Ok(());
        }

        if self.smtp_host.is_empty() {
            return Err("mail.smtp_host cannot be empty when mail is enabled".to_string());
        }

        if self.smtp_port == 0 {
            return Err("mail.smtp_port must be > 0".to_string());
        }

        if self
            .username
            .as_ref()
            .map(|s| s.is_empty())
            .unwrap_or(true)
        {
            return Err("mail.username cannot be empty when mail is enabled".to_string());
        }

        if self
            .password
            .as_ref()
            .map(|s| {
                use secrecy::ExposeSecret;
                s.expose_secret().is_empty()
            })
            .unwrap_or(true)
        {
            return Err("mail.password cannot be empty when mail is enabled".to_string());
        }

        if self.from.is_empty() {
            return Err("mail.from cannot be empty when mail is enabled".to_string());
        }

        if self.to.is_empty() || self.to.iter().any(|addr| addr.is_empty()) {
            return Err(
                "mail.to must list at least one non-empty recipient when mail is enabled"
                    .to_string(),
            );
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Maximum log file size in MB
    #[serde(default = "default_local_max_size_mb")]
    pub local_max_size_mb: usize,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "size"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_max_size_mb == 0 {
            return Err("logging.local_max_size_mb must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            local_max_size_mb: default_local_max_size_mb(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_smtp_port() -> u16 {
    587
}

fn default_subject_prefix() -> String {
    "SPW Report".to_string()
}

fn default_local_path() -> String {
    "/var/log/spw-export".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

fn default_local_max_size_mb() -> usize {
    100
}
