//! Report writer
//!
//! Serializes the normalized report to an xlsx file in the staging slot. The
//! header row is written with no format at all: the downstream tooling rejects
//! styled headers, and `rust_xlsxwriter` applies none unless asked to.

use crate::domain::errors::SpwError;
use crate::domain::result::Result;
use crate::domain::table::NormalizedReport;
use rust_xlsxwriter::Workbook;
use std::path::Path;

/// Write `report` to `dest`, preserving column order.
///
/// Every cell, header included, is written as a plain unstyled string.
///
/// # Errors
///
/// Returns [`SpwError::Write`] on any serialization or filesystem failure.
/// The caller treats this as fatal.
pub fn write_report(report: &NormalizedReport, dest: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in report.columns().iter().enumerate() {
        worksheet
            .write_string(0, col as u16, name)
            .map_err(|e| SpwError::Write(format!("Failed to write header '{name}': {e}")))?;
    }

    for (row_idx, row) in report.rows().iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32 + 1, col as u16, value)
                .map_err(|e| {
                    SpwError::Write(format!(
                        "Failed to write cell ({}, {}): {}",
                        row_idx + 1,
                        col,
                        e
                    ))
                })?;
        }
    }

    workbook
        .save(dest)
        .map_err(|e| SpwError::Write(format!("Failed to save {}: {}", dest.display(), e)))?;

    tracing::info!(dest = %dest.display(), rows = report.rows().len(), "Report staged");
    Ok(())
}
