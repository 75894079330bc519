//! Core domain types and models
//!
//! This module contains the domain layer: the error hierarchy, the shared
//! `Result` alias, and the tabular data model the pipeline operates on.

pub mod errors;
pub mod result;
pub mod table;

// Re-export commonly used types
pub use errors::{DeliveryError, FreshnessError, SpwError};
pub use result::Result;
pub use table::{Cell, NormalizedReport, Table};
