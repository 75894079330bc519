//! Column normalization
//!
//! Renames the `SKIP` column and backfills the two primary-reference columns
//! from `mbl_addl_ref`. The downstream loader requires the literal `#` prefix
//! on the skip column.

use crate::domain::errors::SpwError;
use crate::domain::result::Result;
use crate::domain::table::Table;

/// Upstream name of the skip column
pub const SKIP_COLUMN: &str = "SKIP";
/// Downstream-mandated name of the skip column
pub const RENAMED_SKIP_COLUMN: &str = "#SKIP";

/// MBL primary reference, backfilled when missing
pub const MBL_PRI_REF: &str = "mbl_pri_ref";
/// Shipment primary reference, backfilled when missing
pub const SHIPMENT_PRI_REF: &str = "shipment_pri_ref";
/// Additional reference serving as the backfill source
pub const MBL_ADDL_REF: &str = "mbl_addl_ref";

/// Normalize columns in place.
///
/// 1. Rename `SKIP` to `#SKIP`.
/// 2. Replace missing `mbl_pri_ref` cells with the row's `mbl_addl_ref`.
/// 3. Replace missing `shipment_pri_ref` cells with the row's `mbl_addl_ref`.
///
/// The backfill only fires on truly missing cells; a present-but-empty string
/// stays as it is. Steps 2 and 3 touch disjoint columns, so their order does
/// not matter.
pub fn normalize(table: &mut Table) -> Result<()> {
    table.rename_column(SKIP_COLUMN, RENAMED_SKIP_COLUMN);

    backfill(table, MBL_PRI_REF, MBL_ADDL_REF)?;
    backfill(table, SHIPMENT_PRI_REF, MBL_ADDL_REF)?;

    Ok(())
}

/// Copy `source` into `target` for every row where `target` is missing
fn backfill(table: &mut Table, target: &str, source: &str) -> Result<()> {
    let target_idx = require_column(table, target)?;
    let source_idx = require_column(table, source)?;

    let mut filled = 0usize;
    for row in table.rows_mut() {
        if row[target_idx].is_missing() {
            row[target_idx] = row[source_idx].clone();
            filled += 1;
        }
    }

    if filled > 0 {
        tracing::debug!(target, source, filled, "Backfilled missing references");
    }
    Ok(())
}

fn require_column(table: &Table, name: &str) -> Result<usize> {
    table
        .column_index(name)
        .ok_or_else(|| SpwError::Transform(format!("Extract is missing required column '{name}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::Cell;

    fn ref_table(rows: Vec<Vec<Cell>>) -> Table {
        let mut table = Table::new(vec![
            SKIP_COLUMN.to_string(),
            MBL_PRI_REF.to_string(),
            MBL_ADDL_REF.to_string(),
            SHIPMENT_PRI_REF.to_string(),
        ]);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn test_skip_column_renamed() {
        let mut table = ref_table(vec![]);
        normalize(&mut table).unwrap();

        assert_eq!(table.columns()[0], RENAMED_SKIP_COLUMN);
        assert!(table.column_index(SKIP_COLUMN).is_none());
    }

    #[test]
    fn test_missing_refs_backfilled_from_addl_ref() {
        let mut table = ref_table(vec![vec![
            text("x"),
            Cell::Missing,
            text("REF123"),
            Cell::Missing,
        ]]);

        normalize(&mut table).unwrap();

        let row = &table.rows()[0];
        assert_eq!(row[1], text("REF123"));
        assert_eq!(row[3], text("REF123"));
    }

    #[test]
    fn test_present_refs_untouched() {
        let mut table = ref_table(vec![vec![
            text("x"),
            text("MBL-1"),
            text("REF123"),
            text("S1"),
        ]]);

        normalize(&mut table).unwrap();

        let row = &table.rows()[0];
        assert_eq!(row[1], text("MBL-1"));
        assert_eq!(row[3], text("S1"));
    }

    #[test]
    fn test_empty_string_is_not_backfilled() {
        // A present-but-empty value is not missing; the fill must not fire
        let mut table = ref_table(vec![vec![text("x"), text(""), text("REF123"), text("")]]);

        normalize(&mut table).unwrap();

        let row = &table.rows()[0];
        assert_eq!(row[1], text(""));
        assert_eq!(row[3], text(""));
    }

    #[test]
    fn test_missing_addl_ref_leaves_target_missing() {
        let mut table = ref_table(vec![vec![
            text("x"),
            Cell::Missing,
            Cell::Missing,
            text("S1"),
        ]]);

        normalize(&mut table).unwrap();

        assert_eq!(table.rows()[0][1], Cell::Missing);
    }

    #[test]
    fn test_missing_required_column_is_an_error() {
        let mut table = Table::new(vec![SKIP_COLUMN.to_string()]);
        table.push_row(vec![text("x")]);

        let err = normalize(&mut table).unwrap_err();
        assert!(err.to_string().contains(MBL_PRI_REF));
    }

    #[test]
    fn test_backfill_property_holds_for_all_rows() {
        // After normalization no row may have a missing primary reference
        // while its mbl_addl_ref is present
        let mut table = ref_table(vec![
            vec![text("a"), Cell::Missing, text("R1"), text("S1")],
            vec![text("b"), text("M2"), text("R2"), Cell::Missing],
            vec![text("c"), Cell::Missing, text("R3"), Cell::Missing],
        ]);

        normalize(&mut table).unwrap();

        let addl = table.column_index(MBL_ADDL_REF).unwrap();
        for col in [MBL_PRI_REF, SHIPMENT_PRI_REF] {
            let idx = table.column_index(col).unwrap();
            for row in table.rows() {
                assert!(!(row[idx].is_missing() && !row[addl].is_missing()));
            }
        }
    }
}
