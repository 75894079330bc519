//! Staging slot maintenance
//!
//! The staging directory holds at most one file between runs: the finished
//! report awaiting delivery. Each run clears the slot before writing, so a
//! leftover report from a previous day can never be picked up and emailed.

use std::path::Path;

/// Result of a staging-slot clear
///
/// Clearing is best-effort: removal failures are counted, not raised, so the
/// caller can log and continue. The downstream write simply adds to whatever
/// remains, which is acceptable degraded behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearOutcome {
    /// Files successfully removed
    pub removed: usize,
    /// Files that could not be removed
    pub failed: usize,
}

/// Enforces the zero-or-one-file invariant on the staging directory
#[derive(Debug, Default)]
pub struct StagingManager;

impl StagingManager {
    pub fn new() -> Self {
        Self
    }

    /// Remove every file in the staging directory.
    ///
    /// Idempotent: an empty or missing directory is not an error (the
    /// directory is created if absent so the later write has a target).
    /// Subdirectories are left alone; the slot only ever holds plain files.
    pub fn clear(&self, dir: &Path) -> ClearOutcome {
        let mut outcome = ClearOutcome::default();

        if !dir.exists() {
            if let Err(e) = std::fs::create_dir_all(dir) {
                tracing::warn!(dir = %dir.display(), error = %e, "Failed to create staging directory");
            } else {
                tracing::info!(dir = %dir.display(), "Created missing staging directory");
            }
            return outcome;
        }

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "Failed to list staging directory");
                return outcome;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            match std::fs::remove_file(&path) {
                Ok(_) => outcome.removed += 1,
                Err(e) => {
                    outcome.failed += 1;
                    tracing::warn!(path = %path.display(), error = %e, "Failed to remove staged file");
                }
            }
        }

        tracing::info!(
            dir = %dir.display(),
            removed = outcome.removed,
            failed = outcome.failed,
            "Staging directory cleared"
        );

        outcome
    }
}
