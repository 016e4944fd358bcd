//! DataFrame construction from raw CSV tables.

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tracing::debug;

use crate::csv_table::{CsvTable, read_csv_table};
use crate::polars_utils::parse_f64;

/// Build a typed `DataFrame` from a raw CSV table.
///
/// A column where every non-blank cell parses as a number becomes `Float64`
/// (blank cells null); everything else becomes a `String` column with blank
/// cells stored as null, matching how blank CSV cells behave upstream of the
/// standardization pass.
pub fn to_frame(table: &CsvTable) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(table.headers.len());
    for (col_idx, header) in table.headers.iter().enumerate() {
        let cells: Vec<&str> = table
            .rows
            .iter()
            .map(|row| row.get(col_idx).map(String::as_str).unwrap_or(""))
            .collect();
        let non_blank = cells.iter().filter(|cell| !cell.trim().is_empty()).count();
        let numeric = non_blank > 0
            && cells
                .iter()
                .filter(|cell| !cell.trim().is_empty())
                .all(|cell| parse_f64(cell).is_some());
        if numeric {
            let values: Vec<Option<f64>> = cells.iter().map(|cell| parse_f64(cell)).collect();
            columns.push(Series::new(header.as_str().into(), values).into_column());
        } else {
            let values: Vec<Option<String>> = cells
                .iter()
                .map(|cell| {
                    let trimmed = cell.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        Some(trimmed.to_string())
                    }
                })
                .collect();
            columns.push(Series::new(header.as_str().into(), values).into_column());
        }
    }
    let frame = DataFrame::new(columns).context("build dataframe from csv table")?;
    debug!(
        rows = frame.height(),
        columns = frame.width(),
        "built frame from csv table"
    );
    Ok(frame)
}

/// Read a CSV file straight into a typed `DataFrame`.
pub fn load_frame(path: &Path) -> Result<DataFrame> {
    let table = read_csv_table(path)?;
    to_frame(&table)
}
