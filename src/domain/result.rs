//! Result type alias for spw-export
//!
//! This module provides a convenient Result type alias that uses SpwError
//! as the error type.

use super::errors::SpwError;

/// Result type alias for spw-export operations
///
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use spw_export::domain::result::Result;
/// use spw_export::domain::errors::SpwError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(SpwError::Transform("missing column".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, SpwError>;
