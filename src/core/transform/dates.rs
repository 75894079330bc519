//! Date formatting and the final all-string sweep
//!
//! The four shipment/delivery date columns are rendered as `M/D/YYYY` with no
//! leading zeros (a downstream-system requirement, not locale formatting), and
//! missing dates become the empty string. This runs before the blanket
//! missing-to-empty sweep: the date pass is column-by-column and date-typed,
//! while the sweep only catches what remains in non-date columns.

use crate::domain::errors::SpwError;
use crate::domain::result::Result;
use crate::domain::table::{Cell, NormalizedReport, Table};
use chrono::Datelike;

/// The four columns subject to date formatting, in sheet order
pub const DATE_COLUMNS: [&str; 4] = [
    "ship_start_date",
    "ship_end_date",
    "delivery_start_date",
    "delivery_end_date",
];

/// Column whose first-row value becomes the report date
pub const SHIP_START_DATE: &str = "ship_start_date";

/// Format the four date columns in place.
///
/// Date cells become `M/D/YYYY` text, missing cells become empty text. Cells
/// already textual are left untouched. A named date column absent from the
/// extract is an error.
pub fn format_dates(table: &mut Table) -> Result<()> {
    for name in DATE_COLUMNS {
        let idx = table.column_index(name).ok_or_else(|| {
            SpwError::Transform(format!("Extract is missing date column '{name}'"))
        })?;

        for row in table.rows_mut() {
            row[idx] = match &row[idx] {
                Cell::Date(dt) => Cell::Text(format_report_date(dt.date())),
                Cell::Missing => Cell::Text(String::new()),
                other => other.clone(),
            };
        }
    }
    Ok(())
}

/// `M/D/YYYY` with no leading zeros, as the downstream consumer mandates
fn format_report_date(date: chrono::NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Final normalization pass: replace remaining missing cells with empty
/// strings, coerce every cell to text, and derive the report date.
///
/// Guarantees no emitted cell is of a date or number type. The report date is
/// the (already formatted) `ship_start_date` of the first row.
pub fn finalize(table: Table) -> Result<NormalizedReport> {
    if table.is_empty() {
        return Err(SpwError::Transform(
            "Extract has no data rows; cannot derive a report date".to_string(),
        ));
    }

    let ship_start_idx = table.column_index(SHIP_START_DATE).ok_or_else(|| {
        SpwError::Transform(format!("Extract is missing column '{SHIP_START_DATE}'"))
    })?;

    let report_date = table.rows()[0][ship_start_idx].render();

    let columns = table.columns().to_vec();
    let rows = table
        .rows()
        .iter()
        .map(|row| row.iter().map(Cell::render).collect())
        .collect();

    Ok(NormalizedReport::new(columns, rows, report_date))
}
