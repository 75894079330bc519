//! Freshness gate
//!
//! Verifies that the upstream job actually produced a new extract today before
//! anything is transformed or emailed. The upstream is assumed to be a single
//! producer dropping exactly one file per day; the gate fails loudly when that
//! assumption breaks instead of silently picking an arbitrary file.

use crate::domain::errors::FreshnessError;
use chrono::{DateTime, Local, NaiveDate};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Determines whether today's extract has actually landed
#[derive(Debug, Default)]
pub struct FreshnessGate;

impl FreshnessGate {
    pub fn new() -> Self {
        Self
    }

    /// Select today's extract from the input directory.
    ///
    /// Picks the most recently created file and compares its local calendar
    /// date against `today`. Every failure is fatal: a stale extract means the
    /// upstream job did not run, and proceeding would email a duplicate of a
    /// previous day's report.
    ///
    /// # Errors
    ///
    /// - [`FreshnessError::NoExtract`] when the directory holds no files
    /// - [`FreshnessError::Stale`] when the newest file predates `today`
    /// - [`FreshnessError::AmbiguousExtract`] when several files were created today
    /// - [`FreshnessError::Metadata`] when file metadata cannot be read
    pub fn check(&self, dir: &Path, today: NaiveDate) -> Result<PathBuf, FreshnessError> {
        let candidates = gather_candidates(dir)?;
        classify(dir, &candidates, today)
    }
}

/// List every plain file in the directory with its creation timestamp
fn gather_candidates(dir: &Path) -> Result<Vec<(PathBuf, SystemTime)>, FreshnessError> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| FreshnessError::Metadata(format!("{}: {}", dir.display(), e)))?;

    let mut candidates = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let created = creation_time(&path)?;
        candidates.push((path, created));
    }
    Ok(candidates)
}

/// Creation time, falling back to mtime on filesystems without birth time.
///
/// The upstream job writes each extract once and never touches it again, so
/// the two are interchangeable in practice.
fn creation_time(path: &Path) -> Result<SystemTime, FreshnessError> {
    let meta = std::fs::metadata(path)
        .map_err(|e| FreshnessError::Metadata(format!("{}: {}", path.display(), e)))?;
    meta.created()
        .or_else(|_| meta.modified())
        .map_err(|e| FreshnessError::Metadata(format!("{}: {}", path.display(), e)))
}

/// Pure classification over gathered candidates, separated out for testing
/// against synthetic timestamps.
fn classify(
    dir: &Path,
    candidates: &[(PathBuf, SystemTime)],
    today: NaiveDate,
) -> Result<PathBuf, FreshnessError> {
    let newest = candidates
        .iter()
        .max_by_key(|(_, created)| *created)
        .ok_or_else(|| FreshnessError::NoExtract(dir.display().to_string()))?;

    let newest_date = local_date(newest.1);
    if newest_date != today {
        return Err(FreshnessError::Stale {
            path: newest.0.display().to_string(),
            extract_date: newest_date.to_string(),
            today: today.to_string(),
        });
    }

    let todays = candidates
        .iter()
        .filter(|(_, created)| local_date(*created) == today)
        .count();
    if todays > 1 {
        return Err(FreshnessError::AmbiguousExtract {
            dir: dir.display().to_string(),
            count: todays,
        });
    }

    tracing::info!(path = %newest.0.display(), "Fresh extract found for today");
    Ok(newest.0.clone())
}

/// Local calendar date of a filesystem timestamp
fn local_date(ts: SystemTime) -> NaiveDate {
    DateTime::<Local>::from(ts).date_naive()
}
