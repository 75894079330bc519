//! Tabular data model
//!
//! The extract is read into a [`Table`] of typed [`Cell`]s, transformed in
//! place, and finalized into a [`NormalizedReport`] whose cells are all plain
//! strings. The downstream consumer rejects any date- or number-typed cell, so
//! the all-string invariant is enforced by construction: a `NormalizedReport`
//! can only be built through the finalize pass.

use chrono::NaiveDateTime;

/// A single typed cell of the raw extract
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// No value present (pandas-style null, not an empty string)
    Missing,
    /// Textual value, including the empty string
    Text(String),
    /// Numeric value
    Number(f64),
    /// Boolean value
    Bool(bool),
    /// Date/datetime value
    Date(NaiveDateTime),
}

impl Cell {
    /// Whether the cell holds no value at all
    ///
    /// A present-but-empty string is NOT missing; the reference backfill must
    /// leave it alone.
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Render the cell as the string the emitted report carries.
    ///
    /// Missing becomes the empty string, never a null sentinel. Integral
    /// numbers drop the trailing `.0`. Stray date cells outside the four
    /// designated date columns render as ISO datetimes.
    pub fn render(&self) -> String {
        match self {
            Cell::Missing => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Cell::Bool(b) => b.to_string(),
            Cell::Date(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// In-memory table of named columns and typed rows
///
/// Column order is significant and preserved through every transform pass and
/// into the written report.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create an empty table with the given column headers
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating to the column count
    ///
    /// Spreadsheet readers yield ragged trailing rows; short rows are padded
    /// with `Missing` so every row matches the header width.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Missing);
        self.rows.push(row);
    }

    /// Column headers in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Index of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Rename a column in place; returns whether the column existed
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.column_index(from) {
            Some(idx) => {
                self.columns[idx] = to.to_string();
                true
            }
            None => false,
        }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Vec<Cell>] {
        &mut self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Fully normalized report, ready for serialization
///
/// Every cell is a string; the four date columns hold `M/D/YYYY` or `""`.
/// Built exclusively by [`crate::core::transform::finalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedReport {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    report_date: String,
}

impl NormalizedReport {
    pub(crate) fn new(columns: Vec<String>, rows: Vec<Vec<String>>, report_date: String) -> Self {
        Self {
            columns,
            rows,
            report_date,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Business day the report covers: the formatted `ship_start_date` of the
    /// first row. Used only in delivery metadata.
    pub fn report_date(&self) -> &str {
        &self.report_date
    }
}
