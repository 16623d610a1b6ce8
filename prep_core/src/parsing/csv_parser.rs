use anyhow::{bail, Context, Result};
use encoding_rs::Encoding;
use polars::prelude::{CsvParseOptions, CsvReadOptions, DataFrame, DataType, PolarsResult, SerReader, Series};
use std::io::Cursor;
use std::path::Path;

use crate::core::{Cell, Column, Table};
use crate::io::LoadOptions;

/// Parse a delimited text file into a [`Table`]
///
/// Column types come from Polars schema inference over every row. A single
/// non-numeric cell, including a whitespace-only one, makes the whole column
/// text; later steps rewrite that cell to missing but do not retype the
/// column, so its numbers stay as text unless a cleaner targets it.
pub fn parse_delimited(path: &Path, options: &LoadOptions) -> Result<Table> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to open delimited file {}", path.display()))?;
    parse_delimited_bytes(&bytes, options)
}

/// Parse delimited content held in memory
pub fn parse_delimited_bytes(bytes: &[u8], options: &LoadOptions) -> Result<Table> {
    if !options.delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got {:?}", options.delimiter);
    }
    let content = decode(bytes, &options.encoding)?;

    let df = CsvReadOptions::default()
        .with_has_header(options.has_header)
        // Scan every row so late text values don't break an early numeric guess
        .with_infer_schema_length(None)
        .with_parse_options(CsvParseOptions::default().with_separator(options.delimiter as u8))
        .into_reader_with_file_handle(Cursor::new(content.into_bytes()))
        .finish()
        .context("Failed to parse CSV into DataFrame")?;

    dataframe_to_table(&df)
}

/// Decode raw bytes to UTF-8 using a WHATWG encoding label
pub fn decode(bytes: &[u8], label: &str) -> Result<String> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .with_context(|| format!("Unknown text encoding: {}", label))?;

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        log::warn!(
            "Input contained byte sequences invalid for {}; replaced with U+FFFD",
            used.name()
        );
    }
    Ok(text.into_owned())
}

/// Convert a Polars DataFrame into a [`Table`], column by column
pub fn dataframe_to_table(df: &DataFrame) -> Result<Table> {
    let mut columns = Vec::with_capacity(df.width());

    for column in df.get_columns() {
        let name = column.name().to_string();
        let cells = series_to_cells(column.as_materialized_series())
            .with_context(|| format!("Failed to convert column {}", name))?;
        columns.push(Column::new(name, cells));
    }

    Ok(Table::new(columns)?)
}

fn series_to_cells(series: &Series) -> PolarsResult<Vec<Cell>> {
    let dtype = series.dtype();

    let cells = if dtype == &DataType::Boolean {
        series
            .bool()?
            .into_iter()
            .map(|v| v.map(|b| Cell::Number(if b { 1.0 } else { 0.0 })).unwrap_or(Cell::Missing))
            .collect()
    } else if dtype.is_integer() || dtype.is_float() {
        let floats = series.cast(&DataType::Float64)?;
        floats.f64()?.into_iter().map(Cell::from).collect()
    } else {
        let strings = series.cast(&DataType::String)?;
        strings
            .str()?
            .into_iter()
            .map(|v| v.map(Cell::text).unwrap_or(Cell::Missing))
            .collect()
    };

    Ok(cells)
}
