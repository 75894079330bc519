//! Report transformation passes
//!
//! Three passes, in order: column normalization (rename + reference backfill),
//! date formatting, and the finalize sweep that leaves every cell a string.

pub mod dates;
pub mod normalize;

pub use dates::{finalize, format_dates, DATE_COLUMNS};
pub use normalize::{normalize, MBL_ADDL_REF, MBL_PRI_REF, RENAMED_SKIP_COLUMN, SHIPMENT_PRI_REF};

use crate::domain::result::Result;
use crate::domain::table::{NormalizedReport, Table};

/// Run the full revision: normalize columns, format dates, finalize.
pub fn revise(mut table: Table) -> Result<NormalizedReport> {
    normalize(&mut table)?;
    format_dates(&mut table)?;
    finalize(table)
}
