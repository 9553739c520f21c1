//! Drives a set of scan targets over a `rusqlite` row.

use rusqlite::{Connection, Params, Row, Statement};

use crate::error::{Result, ScanError};
use crate::scanner::Scan;

/// Scans every column of `row` into the target at the same position.
///
/// The whole row fails on the first column that fails; targets before it may
/// already have been written and should not be trusted.
pub fn scan_row<S: Scan>(row: &Row<'_>, targets: &mut [S]) -> Result<()> {
    let stmt: &Statement<'_> = row.as_ref();
    let expected = stmt.column_count();
    if targets.len() != expected {
        return Err(ScanError::TargetCount {
            expected,
            actual: targets.len(),
        });
    }

    for (idx, target) in targets.iter_mut().enumerate() {
        let raw = row.get_ref(idx)?;
        if let Err(err) = target.scan(raw) {
            log::debug!("scan of column {idx} failed: {err}");
            return Err(err);
        }
    }
    Ok(())
}

pub trait RowExt {
    fn scan_into<S: Scan>(&self, targets: &mut [S]) -> Result<()>;
}

impl RowExt for Row<'_> {
    fn scan_into<S: Scan>(&self, targets: &mut [S]) -> Result<()> {
        scan_row(self, targets)
    }
}

/// Runs a query expected to return at least one row and scans the first row
/// into `targets`.
pub fn query_row_into<P: Params, S: Scan>(
    conn: &Connection,
    sql: &str,
    params: P,
    targets: &mut [S],
) -> Result<()> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let row = rows.next()?.ok_or(rusqlite::Error::QueryReturnedNoRows)?;
    scan_row(row, targets)
}
