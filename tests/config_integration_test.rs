//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables should be run with
//! --test-threads=1 to avoid interference between tests.

use secrecy::ExposeSecret;
use spw_export::config::load_config;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    std::env::remove_var("SPW_APPLICATION_LOG_LEVEL");
    std::env::remove_var("SPW_EXTRACT_INPUT_DIR");
    std::env::remove_var("SPW_STAGING_DIR");
    std::env::remove_var("SPW_MAIL_TO");
    std::env::remove_var("TEST_SPW_MAIL_PASSWORD");
}

fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(contents.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[application]
log_level = "debug"

[extract]
input_dir = "/export/data/ftp/MercuryGate"

[staging]
dir = "/export/data/ftp/CurrentReport"

[mail]
enabled = true
smtp_host = "smtp.office365.com"
smtp_port = 587
username = "it@example.com"
password = "test-pass"
from = "it@example.com"
to = ["ops@example.com", "reports@example.com"]
subject_prefix = "SPW Report"

[logging]
local_enabled = false
local_path = "/tmp/spw-export"
local_rotation = "size"
local_max_size_mb = 50
"#;

    let temp_file = write_temp_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.extract.input_dir, "/export/data/ftp/MercuryGate");
    assert_eq!(config.staging.dir, "/export/data/ftp/CurrentReport");
    assert!(config.mail.enabled);
    assert_eq!(config.mail.smtp_host, "smtp.office365.com");
    assert_eq!(config.mail.smtp_port, 587);
    assert_eq!(config.mail.to.len(), 2);
    assert_eq!(config.mail.subject_prefix, "SPW Report");
    assert!(!config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "size");
}

#[test]
fn test_load_config_with_env_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_SPW_MAIL_PASSWORD", "from-env");

    let toml_content = r#"
[extract]
input_dir = "/data/extracts"

[staging]
dir = "/data/staging"

[mail]
smtp_host = "smtp.office365.com"
username = "it@example.com"
password = "${TEST_SPW_MAIL_PASSWORD}"
from = "it@example.com"
to = ["ops@example.com"]
"#;

    let temp_file = write_temp_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(
        config
            .mail
            .password
            .as_ref()
            .unwrap()
            .expose_secret()
            .as_ref(),
        "from-env"
    );

    cleanup_env_vars();
}

#[test]
fn test_load_config_missing_env_var_fails() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[extract]
input_dir = "/data/extracts"

[staging]
dir = "/data/staging"

[mail]
smtp_host = "smtp.office365.com"
username = "it@example.com"
password = "${TEST_SPW_MAIL_PASSWORD}"
from = "it@example.com"
to = ["ops@example.com"]
"#;

    let temp_file = write_temp_config(toml_content);
    let result = load_config(temp_file.path());

    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("TEST_SPW_MAIL_PASSWORD"));
}

#[test]
fn test_env_overrides_take_precedence() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("SPW_EXTRACT_INPUT_DIR", "/override/extracts");
    std::env::set_var("SPW_MAIL_TO", "a@example.com, b@example.com");

    let toml_content = r#"
[extract]
input_dir = "/data/extracts"

[staging]
dir = "/data/staging"

[mail]
smtp_host = "smtp.office365.com"
username = "it@example.com"
password = "secret"
from = "it@example.com"
to = ["ops@example.com"]
"#;

    let temp_file = write_temp_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.extract.input_dir, "/override/extracts");
    assert_eq!(
        config.mail.to,
        vec!["a@example.com".to_string(), "b@example.com".to_string()]
    );

    cleanup_env_vars();
}

#[test]
fn test_defaults_applied_for_optional_settings() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[extract]
input_dir = "/data/extracts"

[staging]
dir = "/data/staging"

[mail]
enabled = false
smtp_host = ""
from = ""
"#;

    let temp_file = write_temp_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.mail.smtp_port, 587);
    assert_eq!(config.mail.subject_prefix, "SPW Report");
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "daily");
}

#[test]
fn test_mail_validation_requires_credentials_when_enabled() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[extract]
input_dir = "/data/extracts"

[staging]
dir = "/data/staging"

[mail]
enabled = true
smtp_host = "smtp.office365.com"
from = "it@example.com"
to = ["ops@example.com"]
"#;

    let temp_file = write_temp_config(toml_content);
    let result = load_config(temp_file.path());

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("mail.username"));
}

#[test]
fn test_invalid_log_level_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[application]
log_level = "verbose"

[extract]
input_dir = "/data/extracts"

[staging]
dir = "/data/staging"

[mail]
enabled = false
smtp_host = ""
from = ""
"#;

    let temp_file = write_temp_config(toml_content);
    let result = load_config(temp_file.path());

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("log_level"));
}
