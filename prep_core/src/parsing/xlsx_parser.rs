//! Spreadsheet (`.xlsx` / `.xls`) reader backed by calamine.

use anyhow::{anyhow, Result};
use calamine::{open_workbook_auto, Data, DataType, Reader};
use std::path::Path;

use crate::core::{Cell, Column, Table};
use crate::io::LoadOptions;

/// Parse one worksheet into a [`Table`].
///
/// Reads `options.sheet` when set, otherwise the first sheet in the workbook.
pub fn parse_spreadsheet(path: &Path, options: &LoadOptions) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| anyhow!("Failed to open spreadsheet {}: {}", path.display(), e))?;

    let range = match &options.sheet {
        Some(name) => workbook
            .worksheet_range(name)
            .map_err(|e| anyhow!("Failed to read worksheet {}: {}", name, e))?,
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| anyhow!("No worksheet found in {}", path.display()))?
            .map_err(|e| anyhow!("Failed to read first worksheet: {}", e))?,
    };

    let rows: Vec<Vec<Cell>> = range
        .rows()
        .map(|row| row.iter().map(data_to_cell).collect())
        .collect();

    rows_to_table(rows, options.has_header)
}

/// Build a table from row-major cells, taking names from the first row when
/// `has_header` is set.
pub fn rows_to_table(mut rows: Vec<Vec<Cell>>, has_header: bool) -> Result<Table> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);

    let header: Vec<Option<String>> = if has_header && !rows.is_empty() {
        rows.remove(0)
            .into_iter()
            .map(|cell| (!cell.is_missing()).then(|| cell.to_string()))
            .collect()
    } else {
        Vec::new()
    };

    let names = column_names(&header, width);
    let mut columns: Vec<Vec<Cell>> = vec![Vec::with_capacity(rows.len()); width];
    for row in rows {
        let mut row = row.into_iter();
        for column in columns.iter_mut() {
            column.push(row.next().unwrap_or(Cell::Missing));
        }
    }

    let columns = names
        .into_iter()
        .zip(columns)
        .map(|(name, cells)| Column::new(name, cells))
        .collect();

    Ok(Table::new(columns)?)
}

/// Header labels with blanks filled as `column_<n>` and repeats suffixed.
fn column_names(header: &[Option<String>], width: usize) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(width);
    for index in 0..width {
        let base = header
            .get(index)
            .cloned()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| format!("column_{}", index + 1));

        let mut name = base.clone();
        let mut counter = 0;
        while names.contains(&name) {
            name = format!("{}_duplicated_{}", base, counter);
            counter += 1;
        }
        names.push(name);
    }
    names
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Missing,
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Float(v) => Cell::Number(*v),
        Data::Bool(v) => Cell::Number(if *v { 1.0 } else { 0.0 }),
        Data::String(v) => Cell::Text(v.clone()),
        other => other
            .as_date()
            .map(Cell::Date)
            .unwrap_or_else(|| Cell::Text(other.to_string())),
    }
}
