//! Business logic
//!
//! The pipeline stages (staging slot maintenance, freshness gate, transform
//! passes) and the run coordinator that sequences them.

pub mod freshness;
pub mod pipeline;
pub mod staging;
pub mod transform;

pub use freshness::FreshnessGate;
pub use pipeline::{exit_code_for, RunCoordinator, RunOutcome};
pub use staging::{ClearOutcome, StagingManager};
