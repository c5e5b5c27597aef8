//! # Table Post-Processing
//!
//! Small rewrites applied to finished tables: dropping list companions and
//! reordering rows by group priority.

use crate::catalog::LIST_SUFFIX;
use crate::error::{AppError, AppResult};
use crate::table::{read_table, write_table, Table};
use csv::StringRecord;
use std::cmp::Ordering;
use std::path::Path;
use tracing::info;

/// Group name sorted ahead of every other group.
pub const PRIORITY_GROUP: &str = "Core";

/// Group marker sorted after every other group.
pub const WILDCARD_GROUP: &str = "*";

/// Column holding the kind name.
const KIND_COLUMN: &str = "Kind";

/// Removes rows whose `Kind` ends in `List`. Returns the number of rows removed.
pub fn filter_lists(table: &mut Table) -> AppResult<usize> {
    let kind_column = table.column(KIND_COLUMN).ok_or_else(|| {
        AppError::General(format!("Table has no `{}` column", KIND_COLUMN))
    })?;

    let before = table.rows.len();
    table.rows.retain(|row| {
        !row.get(kind_column)
            .is_some_and(|kind| kind.ends_with(LIST_SUFFIX))
    });
    Ok(before - table.rows.len())
}

/// Sorts rows: the priority group first, the wildcard group last, the rest
/// alphabetically; ties broken by the first three columns. The header stays put.
pub fn sort_rows(table: &mut Table) {
    table.rows.sort_by(compare_rows);
}

fn group_priority(group: &str) -> u16 {
    match group {
        WILDCARD_GROUP => 999,
        PRIORITY_GROUP => 0,
        _ => 1,
    }
}

fn compare_rows(a: &StringRecord, b: &StringRecord) -> Ordering {
    let cell = |row: &StringRecord, i: usize| row.get(i).unwrap_or_default().to_string();
    let key = |row: &StringRecord| {
        (
            group_priority(row.get(0).unwrap_or_default()),
            cell(row, 0),
            cell(row, 1),
            cell(row, 2),
        )
    };
    key(a).cmp(&key(b))
}

/// Filters list kinds out of `input` and writes the result to `output` (which may be `input`).
pub fn filter_lists_file(input: &Path, output: &Path) -> AppResult<usize> {
    let mut table = read_table(input)?;
    let removed = filter_lists(&mut table)?;
    write_table(output, &table)?;
    info!(
        "Removed {} *{} kinds. {} entries remaining in {}",
        removed,
        LIST_SUFFIX,
        table.rows.len(),
        output.display()
    );
    Ok(table.rows.len())
}

/// Sorts `input` by group priority and writes the result to `output`.
pub fn sort_file(input: &Path, output: &Path) -> AppResult<usize> {
    let mut table = read_table(input)?;
    sort_rows(&mut table);
    write_table(output, &table)?;
    info!("Wrote {} sorted rows to {}", table.rows.len(), output.display());
    Ok(table.rows.len())
}
