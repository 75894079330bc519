//! Extract reader
//!
//! Reads the upstream xlsx extract into the domain [`Table`]. The first sheet
//! is the table; its first row is the header. Cell typing is preserved (text,
//! number, bool, date, missing) so the transform passes can tell a truly
//! missing value from a present-but-empty string.

use crate::domain::errors::SpwError;
use crate::domain::result::Result;
use crate::domain::table::{Cell, Table};
use calamine::{open_workbook_auto, Data, Reader};
use chrono::NaiveDateTime;
use std::path::Path;

/// Read the extract at `path` into a [`Table`].
///
/// # Errors
///
/// Returns [`SpwError::Extract`] when the workbook cannot be opened, has no
/// sheets, or has no header row.
pub fn read_extract(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| SpwError::Extract(format!("Failed to open {}: {}", path.display(), e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SpwError::Extract(format!("{} has no worksheets", path.display())))?
        .map_err(|e| SpwError::Extract(format!("Failed to read {}: {}", path.display(), e)))?;

    let mut rows = range.rows();

    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| SpwError::Extract(format!("{} has no header row", path.display())))?
        .iter()
        .map(header_name)
        .collect();

    let mut table = Table::new(headers);
    for row in rows {
        table.push_row(row.iter().map(decode_cell).collect());
    }

    tracing::info!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.columns().len(),
        "Extract loaded"
    );

    Ok(table)
}

fn header_name(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Map a spreadsheet cell to the domain cell model.
///
/// Error cells count as missing, matching how the upstream consumer of this
/// extract treated them.
fn decode_cell(cell: &Data) -> Cell {
    match cell {
        Data::Empty | Data::Error(_) => Cell::Missing,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => Cell::Date(naive),
            None => Cell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(Cell::Date)
            .unwrap_or_else(|| Cell::Text(s.clone())),
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
