//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::SpwConfig;
use crate::domain::errors::SpwError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into SpwConfig
/// 4. Applies environment variable overrides (SPW_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
pub fn load_config(path: impl AsRef<Path>) -> Result<SpwConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SpwError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SpwError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: SpwConfig = toml::from_str(&contents)
        .map_err(|e| SpwError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config
        .validate()
        .map_err(|e| SpwError::Configuration(format!("Configuration validation failed: {e}")))?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched so a commented-out `${VAR}` reference
/// doesn't force the variable to exist.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("static regex");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(SpwError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the SPW_* prefix
///
/// Environment variables follow the pattern: SPW_<SECTION>_<KEY>
/// For example: SPW_EXTRACT_INPUT_DIR, SPW_MAIL_SMTP_HOST
fn apply_env_overrides(config: &mut SpwConfig) {
    use crate::config::secret::secret_string;

    // Application overrides
    if let Ok(val) = std::env::var("SPW_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Extract / staging overrides
    if let Ok(val) = std::env::var("SPW_EXTRACT_INPUT_DIR") {
        config.extract.input_dir = val;
    }
    if let Ok(val) = std::env::var("SPW_STAGING_DIR") {
        config.staging.dir = val;
    }

    // Mail overrides
    if let Ok(val) = std::env::var("SPW_MAIL_ENABLED") {
        config.mail.enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("SPW_MAIL_SMTP_HOST") {
        config.mail.smtp_host = val;
    }
    if let Ok(val) = std::env::var("SPW_MAIL_SMTP_PORT") {
        if let Ok(port) = val.parse() {
            config.mail.smtp_port = port;
        }
    }
    if let Ok(val) = std::env::var("SPW_MAIL_USERNAME") {
        config.mail.username = Some(val);
    }
    if let Ok(val) = std::env::var("SPW_MAIL_PASSWORD") {
        config.mail.password = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("SPW_MAIL_FROM") {
        config.mail.from = val;
    }
    if let Ok(val) = std::env::var("SPW_MAIL_TO") {
        config.mail.to = val.split(',').map(|s| s.trim().to_string()).collect();
    }

    // Logging overrides
    if let Ok(val) = std::env::var("SPW_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("SPW_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
