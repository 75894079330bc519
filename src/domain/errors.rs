//! Domain error types
//!
//! This module defines the error hierarchy for spw-export. All errors are
//! domain-specific and don't expose third-party types, so callers can match on
//! the fatal/non-fatal taxonomy without pulling adapter crates into scope.

use thiserror::Error;

/// Main spw-export error type
///
/// This is the primary error type used throughout the application.
/// Whether a variant is fatal is decided by the pipeline coordinator:
/// freshness and write failures abort the run, delivery failures do not.
#[derive(Debug, Error)]
pub enum SpwError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Extract reading/parsing errors
    #[error("Extract error: {0}")]
    Extract(String),

    /// Freshness-gate errors (always fatal)
    #[error("Freshness error: {0}")]
    Freshness(#[from] FreshnessError),

    /// Transform errors (missing required column, empty extract)
    #[error("Transform error: {0}")]
    Transform(String),

    /// Report write errors (always fatal)
    #[error("Write error: {0}")]
    Write(String),

    /// Mail delivery errors (never fatal)
    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Freshness-gate errors
///
/// Raised when today's extract cannot be identified unambiguously.
/// Every variant is fatal: the run must abort before any transformation so a
/// stale duplicate of a previous day's report is never emailed.
#[derive(Debug, Error)]
pub enum FreshnessError {
    /// The extract directory holds no files at all
    #[error("No extract file found in {0}")]
    NoExtract(String),

    /// The newest extract predates today
    #[error("Most recent extract {path} was created on {extract_date}, not today ({today})")]
    Stale {
        path: String,
        extract_date: String,
        today: String,
    },

    /// More than one extract was created today
    ///
    /// The upstream job is assumed to produce exactly one file per day; when
    /// that assumption breaks we fail loudly instead of picking one at random.
    #[error("{count} extract files were created today in {dir}; expected exactly one")]
    AmbiguousExtract { dir: String, count: usize },

    /// File metadata could not be read
    #[error("Failed to read extract metadata: {0}")]
    Metadata(String),
}

/// Mail delivery errors
///
/// These errors don't expose the SMTP client types. Delivery failures are
/// contained: the report stays correctly staged, so an operator can resend
/// manually from the staging slot.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// A configured sender or recipient address failed to parse
    #[error("Invalid mail address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// The staged report could not be read for attaching
    #[error("Failed to read attachment {path}: {reason}")]
    Attachment { path: String, reason: String },

    /// The message could not be assembled
    #[error("Failed to compose message: {0}")]
    Compose(String),

    /// SMTP submission failed
    #[error("SMTP transport failed: {0}")]
    Transport(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for SpwError {
    fn from(err: std::io::Error) -> Self {
        SpwError::Io(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for SpwError {
    fn from(err: toml::de::Error) -> Self {
        SpwError::Configuration(format!("TOML parse error: {err}"))
    }
}
